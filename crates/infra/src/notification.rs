//! # メール送信
//!
//! 従業員向け・顧客向けメールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（lettre）、Noop（ログのみ）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **送信元はメッセージ単位**: 販売者ごとに送信元アドレスが異なるため、
//!   [`EmailMessage::from`] を使う

mod noop;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use returnflow_domain::notification::{EmailMessage, NotificationError};
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
