//! # 返品通知ユースケース
//!
//! 返品ステータスの変更イベントを受け取り、従業員と顧客に通知する。
//!
//! ## 状態遷移
//!
//! ```text
//! Validating → Resolving → BuildingTemplate → Dispatching → Done
//! ```
//!
//! - `Validating` / `Resolving` / `BuildingTemplate` での失敗はオペレーション全体を中断し、
//!   何も送信しない
//! - `Dispatching` に入れば必ず `Done` に到達する（送信の失敗は結果レコードに記録される）
//! - 前の状態に戻ることもリトライもない
//!
//! ## 構成
//!
//! - [`payload`] - 型なしペイロードの型変換
//! - [`validator`] - 参照データとの突き合わせ
//! - [`template_builder`] - テンプレートコンテキストの組み立て
//! - [`dispatcher`] - チャネルごとの送信

pub mod dispatcher;
pub mod payload;
pub mod template_builder;
pub mod validator;

use std::sync::Arc;

pub use dispatcher::NotificationDispatcher;
pub use payload::ReturnNotificationPayload;
use returnflow_domain::notification::NotificationResult;
use returnflow_infra::{
    notification::NotificationSender,
    repository::{ContractorRepository, NotificationSettingsRepository, ResellerRepository},
    sms::SmsSender,
};
use returnflow_shared::{event_log::event, log_business_event};
use serde_json::Value;
pub use template_builder::TemplateBuilder;
use tracing::Instrument;
pub use validator::{PayloadValidator, ValidatedReturn};

use super::template_renderer::MessageRenderer;
use crate::error::CoreError;

/// オペレーションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OperationPhase {
    Validating,
    Resolving,
    BuildingTemplate,
    Dispatching,
    Done,
}

/// ユースケースが依存するコラボレーター
pub struct ReturnNotificationDeps {
    pub reseller_repo:   Arc<dyn ResellerRepository>,
    pub contractor_repo: Arc<dyn ContractorRepository>,
    pub settings_repo:   Arc<dyn NotificationSettingsRepository>,
    pub renderer:        Arc<dyn MessageRenderer>,
    pub email_sender:    Arc<dyn NotificationSender>,
    pub sms_sender:      Arc<dyn SmsSender>,
}

/// 返品通知ユースケース
///
/// 呼び出しごとに状態を持たないため、同じ入力と冪等なコラボレーターに対しては
/// 常に同じ結果を返す。
pub struct ReturnNotificationUseCase {
    validator:        PayloadValidator,
    template_builder: TemplateBuilder,
    dispatcher:       NotificationDispatcher,
}

impl ReturnNotificationUseCase {
    pub fn new(deps: ReturnNotificationDeps) -> Self {
        Self {
            validator:        PayloadValidator::new(deps.reseller_repo, deps.contractor_repo),
            template_builder: TemplateBuilder::new(Arc::clone(&deps.renderer)),
            dispatcher:       NotificationDispatcher::new(
                deps.settings_repo,
                deps.renderer,
                deps.email_sender,
                deps.sms_sender,
            ),
        }
    }

    /// 返品通知を実行する
    ///
    /// # 引数
    ///
    /// - `raw`: 型なしのイベントペイロード（JSON オブジェクト）
    ///
    /// # エラー
    ///
    /// - 参照データが見つからない場合は `ReferenceNotFound`
    /// - テンプレート変数が空の場合は `IncompleteTemplate`
    /// - 参照ストアの障害は `Database`
    ///
    /// 送信の失敗はエラーにならず、戻り値のチャネルごとのフラグで表される。
    pub async fn execute(&self, raw: &Value) -> Result<NotificationResult, CoreError> {
        let payload = ReturnNotificationPayload::from_raw(raw);
        let span = tracing::info_span!(
            "return_notification",
            reseller_id = %payload.reseller_id,
            complaint_id = payload.complaint_id,
        );

        async move {
            let reseller_id = payload.reseller_id;
            let result = self.run(payload).await;

            match &result {
                Ok(outcome) => log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::RETURN_NOTIFICATION_DISPATCHED,
                    event.reseller_id = %reseller_id,
                    event.result = event::result::SUCCESS,
                    staff_email_sent = outcome.staff_email_sent,
                    client_email_sent = outcome.client_email_sent,
                    client_sms_sent = outcome.client_sms.sent,
                    "返品通知を送信しました"
                ),
                Err(e) => log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::RETURN_NOTIFICATION_REJECTED,
                    event.reseller_id = %reseller_id,
                    event.result = event::result::FAILURE,
                    error = %e,
                    "返品通知を中断しました"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        payload: ReturnNotificationPayload,
    ) -> Result<NotificationResult, CoreError> {
        enter(OperationPhase::Validating);
        let validated = self.validator.validate(payload).await?;

        enter(OperationPhase::BuildingTemplate);
        let context = self.template_builder.build(&validated)?;

        enter(OperationPhase::Dispatching);
        let result = self
            .dispatcher
            .dispatch(
                validated.reseller.id(),
                validated.payload.kind,
                &validated.client,
                &context,
            )
            .await;

        enter(OperationPhase::Done);
        Ok(result)
    }
}

fn enter(phase: OperationPhase) {
    tracing::debug!(phase = %phase, "返品通知: {}", phase);
}
