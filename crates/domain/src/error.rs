//! # ドメイン層エラー定義
//!
//! 返品通知オペレーションを中断させるエラーを表現する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `ReferenceNotFound` | 400 Bad Request | 販売者・顧客・作成者・担当者が存在しない、または不整合 |
//! | `InvalidStatusCode` | 400 Bad Request | ステータス表にないコード |
//! | `IncompleteTemplate` | 500 Internal Server Error | テンプレート変数が空（内部不変条件違反） |
//!
//! チャネル単位の送信失敗はこのエラーに含めない。送信結果は
//! [`NotificationResult`](crate::notification::NotificationResult) に記録される。

use strum::IntoStaticStr;
use thiserror::Error;

use crate::template::TemplateField;

/// 参照データの種別
///
/// `ReferenceNotFound` のどの検証で失敗したかを表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
pub enum ReferenceKind {
    /// 販売者
    Seller,
    /// 顧客（取引先種別が顧客で、販売者が一致すること）
    Client,
    /// 作成者（従業員）
    Creator,
    /// 担当エキスパート（従業員）
    Expert,
}

/// ドメイン層で発生するエラー
///
/// いずれも送信処理の前に検出され、オペレーション全体を中断する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 参照データが見つからない、または整合しない
    #[error("{kind} が見つかりません: {id}")]
    ReferenceNotFound {
        /// 参照データの種別
        kind: ReferenceKind,
        /// ペイロードで指定された ID（整数に変換済み）
        id:   i64,
    },

    /// テンプレート変数が空
    ///
    /// 部分的なテンプレートで通知を送ることはしない。
    #[error("テンプレート変数 ({field}) が空です")]
    IncompleteTemplate {
        /// 最初に空と判定されたフィールド
        field: TemplateField,
    },

    /// ステータス表に存在しないコード
    #[error("不正なステータスコード: {0}")]
    InvalidStatusCode(i64),
}

impl DomainError {
    /// 参照データ未検出エラーを生成する
    pub fn reference_not_found(kind: ReferenceKind, id: i64) -> Self {
        Self::ReferenceNotFound { kind, id }
    }

    /// 呼び出し元の入力に起因するエラーかどうか
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::ReferenceNotFound { .. } | Self::InvalidStatusCode(_) => true,
            Self::IncompleteTemplate { .. } => false,
        }
    }
}
