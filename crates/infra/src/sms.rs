//! # SMS 送信
//!
//! 顧客向け SMS の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `SmsSender` trait で SMS ゲートウェイを抽象化
//! - **2 つの実装**: HTTP ゲートウェイ（reqwest）、Noop（ログのみ）
//! - **環境変数切替**: `SMS_BACKEND` でランタイム選択
//! - **失敗は値で返す**: 送信結果は [`SmsDelivery`] として呼び出し側にそのまま渡る。
//!   トランスポートエラーも `sent: false` とエラーメッセージに変換する

mod gateway;
mod noop;

use async_trait::async_trait;
pub use gateway::HttpSmsSender;
pub use noop::NoopSmsSender;
use returnflow_domain::notification::{SmsDelivery, SmsMessage};

/// SMS 送信トレイト
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// SMS を送信し、ゲートウェイの応答を返す
    async fn send_sms(&self, sms: &SmsMessage) -> SmsDelivery;
}
