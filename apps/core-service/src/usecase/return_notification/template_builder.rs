//! # テンプレートコンテキストの組み立て
//!
//! 検証済みの返品通知から [`TemplateContext`] を組み立てる。
//!
//! 差分文言は通知種別で決まる:
//!
//! - 新規: 固定の「新規ポジション追加」文言
//! - ステータス変更（変更前後がそろっている）: 両ステータス名を埋め込んだ文言
//! - それ以外: 空文字列
//!
//! 組み立て後に全フィールドを検査し、1 つでも空があれば全体を拒否する。

use std::sync::Arc;

use returnflow_domain::{
    notification::{Differences, MessageKey, MessageParams, NotificationKind},
    reseller::ResellerId,
    status::status_name,
    template::TemplateContext,
};

use super::validator::ValidatedReturn;
use crate::{error::CoreError, usecase::template_renderer::MessageRenderer};

/// テンプレートコンテキストビルダー
pub struct TemplateBuilder {
    renderer: Arc<dyn MessageRenderer>,
}

impl TemplateBuilder {
    pub fn new(renderer: Arc<dyn MessageRenderer>) -> Self {
        Self { renderer }
    }

    /// テンプレートコンテキストを組み立てる
    ///
    /// # エラー
    ///
    /// - 空のフィールドがある場合は `IncompleteTemplate`
    /// - 差分のステータスコードが未定義の場合は `InvalidStatusCode`
    /// - 差分文言のレンダリングに失敗した場合は `Internal`
    pub fn build(&self, validated: &ValidatedReturn) -> Result<TemplateContext, CoreError> {
        let payload = &validated.payload;
        let differences = self.differences_sentence(payload.kind, payload.reseller_id)?;

        let context = TemplateContext {
            complaint_id: payload.complaint_id,
            complaint_number: payload.complaint_number.clone(),
            creator_id: payload.creator_id,
            creator_name: validated.creator.full_name().to_string(),
            expert_id: payload.expert_id,
            expert_name: validated.expert.full_name().to_string(),
            client_id: payload.client_id,
            client_name: validated.client.display_name().to_string(),
            consumption_id: payload.consumption_id,
            consumption_number: payload.consumption_number.clone(),
            agreement_number: payload.agreement_number.clone(),
            date: payload.date.clone(),
            differences,
        };

        context.ensure_complete()?;
        Ok(context)
    }

    fn differences_sentence(
        &self,
        kind: NotificationKind,
        reseller_id: ResellerId,
    ) -> Result<String, CoreError> {
        let (key, params) = match kind {
            NotificationKind::New => (MessageKey::NewPositionAdded, MessageParams::new()),
            NotificationKind::Changed(Differences {
                from: Some(from),
                to: Some(to),
            }) => {
                let params = MessageParams::from([
                    ("FROM".to_string(), status_name(from)?.to_string()),
                    ("TO".to_string(), status_name(to)?.to_string()),
                ]);
                (MessageKey::PositionStatusHasChanged, params)
            }
            NotificationKind::Changed(_) | NotificationKind::Unsupported(_) => {
                return Ok(String::new());
            }
        };

        self.renderer
            .render(key, &params, reseller_id)
            .map_err(|e| CoreError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::{
        DomainError,
        contractor::ContractorId,
        reseller::Reseller,
        template::TemplateField,
    };
    use serde_json::json;

    use super::*;
    use crate::{
        test_utils::{
            CLIENT_ID,
            CREATOR_ID,
            EXPERT_ID,
            RESELLER_ID,
            changed_payload,
            make_client_named,
            make_employee,
            new_payload,
        },
        usecase::{
            return_notification::payload::ReturnNotificationPayload,
            template_renderer::TeraMessageRenderer,
        },
    };

    fn builder() -> TemplateBuilder {
        TemplateBuilder::new(Arc::new(TeraMessageRenderer::new().unwrap()))
    }

    fn validated(raw: serde_json::Value) -> ValidatedReturn {
        ValidatedReturn {
            payload:  ReturnNotificationPayload::from_raw(&raw),
            reseller: Reseller::new(ResellerId::new(RESELLER_ID)),
            client:   make_client_named("顧客 一郎", "顧客"),
            creator:  make_employee(CREATOR_ID, "作成 太郎"),
            expert:   make_employee(EXPERT_ID, "担当 花子"),
        }
    }

    fn with_field(mut raw: serde_json::Value, key: &str, value: serde_json::Value) -> serde_json::Value {
        if let Some(object) = raw.as_object_mut() {
            object.insert(key.to_string(), value);
        }
        raw
    }

    #[test]
    fn test_ステータス変更で全フィールドが埋まる() {
        let context = builder().build(&validated(changed_payload(1, 2))).unwrap();

        assert_eq!(
            context,
            TemplateContext {
                complaint_id:       100,
                complaint_number:   "R-100".to_string(),
                creator_id:         ContractorId::new(CREATOR_ID),
                creator_name:       "作成 太郎".to_string(),
                expert_id:          ContractorId::new(EXPERT_ID),
                expert_name:        "担当 花子".to_string(),
                client_id:          ContractorId::new(CLIENT_ID),
                client_name:        "顧客 一郎".to_string(),
                consumption_id:     200,
                consumption_number: "C-200".to_string(),
                agreement_number:   "AG-7".to_string(),
                date:               "2024-05-01".to_string(),
                differences:        "返品ステータスが「Pending」から「Rejected」に変更されました"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_新規は差分の内容に関係なく固定文言になる() {
        let raw = with_field(new_payload(), "differences", json!({"from": 1, "to": 2}));

        let context = builder().build(&validated(raw)).unwrap();

        assert_eq!(context.differences, "新しい返品ポジションが追加されました");
    }

    #[test]
    fn test_顧客名はフルネームが空白なら名前にフォールバックする() {
        let mut validated = validated(changed_payload(1, 2));
        validated.client = make_client_named("   ", "顧客");

        let context = builder().build(&validated).unwrap();

        assert_eq!(context.client_name, "顧客");
    }

    #[test]
    fn test_差分がないステータス変更はincomplete_template() {
        let raw = with_field(changed_payload(1, 2), "differences", json!(null));

        let err = builder().build(&validated(raw)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Domain(DomainError::IncompleteTemplate {
                field: TemplateField::Differences
            })
        ));
    }

    #[test]
    fn test_未対応の通知種別はincomplete_template() {
        let raw = with_field(changed_payload(1, 2), "notificationType", json!(7));

        let err = builder().build(&validated(raw)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Domain(DomainError::IncompleteTemplate {
                field: TemplateField::Differences
            })
        ));
    }

    #[test]
    fn test_空のフィールドは宣言順で最初のものが報告される() {
        let raw = with_field(changed_payload(1, 2), "agreementNumber", json!("0"));
        let raw = with_field(raw, "date", json!(""));

        let err = builder().build(&validated(raw)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Domain(DomainError::IncompleteTemplate {
                field: TemplateField::AgreementNumber
            })
        ));
    }

    #[test]
    fn test_未定義のステータスコードはinvalid_status_code() {
        let err = builder().build(&validated(changed_payload(1, 9))).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Domain(DomainError::InvalidStatusCode(9))
        ));
    }
}
