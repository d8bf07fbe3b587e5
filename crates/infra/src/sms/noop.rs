//! Noop SMS 送信実装

use async_trait::async_trait;
use returnflow_domain::notification::{SmsDelivery, SmsMessage};

use super::SmsSender;

/// Noop SMS 送信（ログ出力のみ）
///
/// 常に送信成功として応答する。
#[derive(Debug, Clone)]
pub struct NoopSmsSender;

#[async_trait]
impl SmsSender for NoopSmsSender {
    async fn send_sms(&self, sms: &SmsMessage) -> SmsDelivery {
        tracing::info!(
            reseller_id = %sms.reseller_id,
            client_id = %sms.client_id,
            differences_code = sms.differences_code,
            "Noop: SMS 送信をスキップ"
        );
        SmsDelivery::delivered()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::{
        contractor::ContractorId,
        notification::{MessageParams, NotificationEvent},
        reseller::ResellerId,
    };

    use super::*;

    #[tokio::test]
    async fn send_smsは送信成功を返す() {
        let sms = SmsMessage {
            reseller_id:      ResellerId::new(1),
            client_id:        ContractorId::new(2),
            event:            NotificationEvent::ChangeReturnStatus,
            differences_code: 2,
            params:           MessageParams::new(),
        };

        assert_eq!(NoopSmsSender.send_sms(&sms).await, SmsDelivery::delivered());
    }
}
