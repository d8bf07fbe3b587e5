//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。

use async_trait::async_trait;
use returnflow_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            event = %email.event,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use returnflow_domain::{notification::NotificationEvent, reseller::ResellerId};

    use super::*;

    #[tokio::test]
    async fn send_emailがエラーを返さない() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            from:             "shop@example.com".to_string(),
            to:               "staff@example.com".to_string(),
            subject:          "返品 R-1".to_string(),
            body:             "本文".to_string(),
            reseller_id:      ResellerId::new(1),
            event:            NotificationEvent::ChangeReturnStatus,
            client_id:        None,
            differences_code: None,
        };

        let result = sender.send_email(&email).await;
        assert!(result.is_ok());
    }
}
