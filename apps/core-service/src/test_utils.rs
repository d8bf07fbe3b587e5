//! テスト用ユーティリティ
//!
//! 単体テストと統合テストで共有するフィクスチャを提供する。

mod return_notification_fixture;

pub use return_notification_fixture::*;
