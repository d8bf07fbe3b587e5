//! # リポジトリ実装
//!
//! 返品通知が参照する外部データの読み取りを担当する。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: 販売者・取引先・通知設定はすべて他システムが管理する
//! - **トレイト経由**: ユースケースは `Arc<dyn Trait>` でのみ依存し、テストではモックに差し替える
//! - **実行時クエリ**: `sqlx::query_as` と `FromRow` で行をマッピングする

pub mod contractor_repository;
pub mod notification_settings_repository;
pub mod reseller_repository;

pub use contractor_repository::{ContractorRepository, PostgresContractorRepository};
pub use notification_settings_repository::{
    NotificationSettingsRepository,
    PostgresNotificationSettingsRepository,
};
pub use reseller_repository::{PostgresResellerRepository, ResellerRepository};
