//! # 返品通知 API ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! POST /internal/returns/notifications
//! ```
//!
//! リクエストボディの `data` メンバーを型なしのペイロードとして扱う。
//! `data` がない場合は空のペイロードになり、参照データの検証で失敗する。
//!
//! ## レスポンス
//!
//! - 200: `{ "data": { "staffEmailSent", "clientEmailSent", "clientSms": { "sent", "message" } } }`
//! - 400: 不正な JSON、参照データ未検出、未定義のステータスコード
//! - 500: テンプレート不備、参照ストアの障害

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use returnflow_shared::ApiResponse;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::CoreError, usecase::ReturnNotificationUseCase};

/// 返品通知 API の共有状態
pub struct ReturnNotificationState {
    pub usecase: ReturnNotificationUseCase,
}

/// 返品通知リクエスト
#[derive(Debug, Deserialize)]
pub struct NotifyReturnRequest {
    #[serde(default)]
    pub data: Value,
}

/// POST /internal/returns/notifications
///
/// 返品ステータスの変更を従業員と顧客に通知する。
/// JSON として解釈できないボディは 400 を返す。
#[tracing::instrument(skip_all)]
pub async fn notify_return_status_changed(
    State(state): State<Arc<ReturnNotificationState>>,
    body: Result<Json<NotifyReturnRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CoreError> {
    let Json(req) = body.map_err(|e| CoreError::BadRequest(e.body_text()))?;
    let result = state.usecase.execute(&req.data).await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(result))))
}
