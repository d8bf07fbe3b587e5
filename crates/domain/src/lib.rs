//! # ReturnFlow ドメイン層
//!
//! 返品ステータス通知の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: ID・ステータス・通知種別を型で表現し、整数定数との比較を排除
//! - **読み取り専用**: 参照データ（販売者・取引先）は外部ストアが所有し、ドメインは読むだけ
//! - **ドメインエラー**: 検証失敗・テンプレート不備を列挙型で表現
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//!          ↘              ↑
//!            ────────────
//! ```
//!
//! ドメイン層はインフラ層（DB、メール、SMS）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`contractor`] - 取引先（顧客・従業員）
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`notification`] - 通知種別・送信メッセージ・送信結果
//! - [`reseller`] - 販売者（テナント）
//! - [`status`] - 返品ステータスと表示名
//! - [`template`] - テンプレートコンテキスト
//!
//! ## 使用例
//!
//! ```rust
//! use returnflow_domain::{DomainError, status::ReturnStatus};
//!
//! assert_eq!(ReturnStatus::try_from(1).unwrap().name(), "Pending");
//! assert!(matches!(
//!     ReturnStatus::try_from(9),
//!     Err(DomainError::InvalidStatusCode(9))
//! ));
//! ```

#[macro_use]
mod macros;

pub mod contractor;
pub mod error;
pub mod notification;
pub mod reseller;
pub mod status;
pub mod template;

pub use error::{DomainError, ReferenceKind};
