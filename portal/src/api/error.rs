//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::common::error::{ActionFailure, PortalError};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub PortalError);

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}

impl IntoResponse for ActionFailure {
    fn into_response(self) -> axum::response::Response {
        // チケット作成前の失敗（不明なアクション）はチケット参照を持たない
        let Some(ticket_ref) = self.ticket_ref else {
            return AppError(self.error).into_response();
        };

        let payload = json!({
            "error": format!("pipeline trigger failed: {}", self.error),
            "ticket_ref": ticket_ref,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    }
}
