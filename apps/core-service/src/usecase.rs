//! # ユースケース層
//!
//! ハンドラから呼び出されるアプリケーションロジック。
//!
//! - [`return_notification`] - 返品ステータス通知のオーケストレーション
//! - [`template_renderer`] - メッセージキーのレンダリング

pub mod return_notification;
pub mod template_renderer;

pub use return_notification::{ReturnNotificationDeps, ReturnNotificationUseCase};
pub use template_renderer::{MessageRenderer, TeraMessageRenderer};
