//! # メッセージレンダラー
//!
//! メッセージキーとパラメータからローカライズ済みの文字列を生成する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: ユースケースは [`MessageRenderer`] にのみ依存する
//! - **`include_str!` によるコンパイル時埋め込み**: 既定実装のテンプレートはバイナリに埋め込まれる
//! - **販売者 ID を受け取る**: 販売者ごとの文言切り替えに備えたシグネチャ。
//!   同梱テンプレートは販売者に依存しない

use returnflow_domain::{
    notification::{MessageKey, MessageParams, NotificationError},
    reseller::ResellerId,
};
use tera::{Context, Tera};

/// メッセージレンダラートレイト
pub trait MessageRenderer: Send + Sync {
    /// メッセージキーに対応する文字列をレンダリングする
    ///
    /// 前後の空白・改行は取り除かれる。
    fn render(
        &self,
        key: MessageKey,
        params: &MessageParams,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError>;
}

const TEMPLATES: [(MessageKey, &str); 6] = [
    (
        MessageKey::NewPositionAdded,
        include_str!("../../templates/messages/new_position_added.txt"),
    ),
    (
        MessageKey::PositionStatusHasChanged,
        include_str!("../../templates/messages/position_status_changed.txt"),
    ),
    (
        MessageKey::EmployeeEmailSubject,
        include_str!("../../templates/messages/employee_email_subject.txt"),
    ),
    (
        MessageKey::EmployeeEmailBody,
        include_str!("../../templates/messages/employee_email_body.txt"),
    ),
    (
        MessageKey::ClientEmailSubject,
        include_str!("../../templates/messages/client_email_subject.txt"),
    ),
    (
        MessageKey::ClientEmailBody,
        include_str!("../../templates/messages/client_email_body.txt"),
    ),
];

/// tera によるメッセージレンダラー
///
/// テンプレート名はメッセージキーの文字列表現（例: `complaintEmployeeEmailBody`）。
/// 拡張子を付けないため自動エスケープは行われない。
pub struct TeraMessageRenderer {
    engine: Tera,
}

impl TeraMessageRenderer {
    /// 埋め込みテンプレートを登録したレンダラーを作成する
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(
                TEMPLATES
                    .iter()
                    .map(|(key, source)| (<&'static str>::from(*key), *source)),
            )
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }
}

impl MessageRenderer for TeraMessageRenderer {
    fn render(
        &self,
        key: MessageKey,
        params: &MessageParams,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError> {
        let mut context = Context::new();
        for (name, value) in params {
            context.insert(name.as_str(), value);
        }

        let name: &'static str = key.into();
        let rendered = self.engine.render(name, &context).map_err(|e| {
            NotificationError::TemplateFailed(format!("{name} (reseller {reseller_id}): {e}"))
        })?;

        Ok(rendered.trim().to_string())
    }
}
