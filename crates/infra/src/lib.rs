//! # ReturnFlow インフラ層
//!
//! 返品通知オペレーションが利用する外部コラボレーターの抽象と実装。
//!
//! ## 設計方針
//!
//! コアのオーケストレーションは、ここで定義するトレイトだけに依存する。
//! 参照データの検索、メール・SMS のトランスポート、購読設定の取得は
//! すべて差し替え可能な実装として提供する。
//!
//! ## 責務
//!
//! - **参照データ**: 販売者・取引先の ID 検索（PostgreSQL）
//! - **通知設定**: 送信元アドレスと従業員の購読メールアドレス（PostgreSQL）
//! - **メール送信**: SMTP（lettre）と Noop
//! - **SMS 送信**: HTTP ゲートウェイ（reqwest）と Noop
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`repository`] - 参照データ・通知設定のリポジトリ
//! - [`sms`] - SMS 送信
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;
pub mod sms;

pub use error::{InfraError, InfraErrorKind};
