//! # Core Service エラー定義
//!
//! Core Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 参照データの不整合は呼び出し側の入力に起因するため 400、
//! テンプレート不備と参照ストアの障害は内部エラーとして 500 を返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use returnflow_domain::DomainError;
use returnflow_infra::InfraError;
use returnflow_shared::{ErrorResponse, event_log::error};
use thiserror::Error;

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// ドメインルール違反（参照データ未検出・テンプレート不備）
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// 参照ストアのエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP ステータスコードとレスポンスボディに変換する
    fn to_problem(&self) -> (StatusCode, ErrorResponse) {
        match self {
            CoreError::Domain(e @ DomainError::ReferenceNotFound { .. }) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::reference_not_found(e.to_string()),
            ),
            CoreError::Domain(e @ DomainError::InvalidStatusCode(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request(e.to_string()),
            ),
            CoreError::Domain(e @ DomainError::IncompleteTemplate { .. }) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::TEMPLATE,
                    "テンプレート変数が不足しています: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::incomplete_template(e.to_string()),
                )
            }
            CoreError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg.clone()))
            }
            CoreError::Database(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::DATABASE,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    "内部エラー: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_problem();
        (status, Json(body)).into_response()
    }
}
