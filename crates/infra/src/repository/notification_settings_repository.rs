//! # NotificationSettingsRepository
//!
//! 販売者ごとの通知設定を取得するリポジトリ。
//!
//! - 送信元メールアドレス（`seller_notification_settings`）
//! - 権限キーごとの購読従業員メールアドレス（`seller_notification_subscriptions`）

use async_trait::async_trait;
use returnflow_domain::reseller::ResellerId;
use sqlx::PgPool;

use crate::error::InfraError;

/// 通知設定リポジトリトレイト
#[async_trait]
pub trait NotificationSettingsRepository: Send + Sync {
    /// 権限キーを購読している従業員のメールアドレス一覧
    ///
    /// 空文字のアドレスは含めない。
    async fn find_subscribed_emails(
        &self,
        reseller_id: ResellerId,
        permit_key: &str,
    ) -> Result<Vec<String>, InfraError>;

    /// 販売者の送信元メールアドレス
    ///
    /// 未設定または空文字の場合は `None`。
    async fn find_sender_email(&self, reseller_id: ResellerId)
    -> Result<Option<String>, InfraError>;
}

/// PostgreSQL 実装の NotificationSettingsRepository
#[derive(Debug, Clone)]
pub struct PostgresNotificationSettingsRepository {
    pool: PgPool,
}

impl PostgresNotificationSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSettingsRepository for PostgresNotificationSettingsRepository {
    async fn find_subscribed_emails(
        &self,
        reseller_id: ResellerId,
        permit_key: &str,
    ) -> Result<Vec<String>, InfraError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT email
            FROM seller_notification_subscriptions
            WHERE seller_id = $1
              AND permit_key = $2
              AND email <> ''
            ORDER BY email
            "#,
        )
        .bind(reseller_id.as_i64())
        .bind(permit_key)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(email,)| email).collect())
    }

    async fn find_sender_email(
        &self,
        reseller_id: ResellerId,
    ) -> Result<Option<String>, InfraError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT email_from
            FROM seller_notification_settings
            WHERE seller_id = $1
            "#,
        )
        .bind(reseller_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(|(email,)| email)
            .filter(|email| !email.trim().is_empty()))
    }
}
