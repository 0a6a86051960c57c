//! メンテナンスアクションAPI

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::error::AppError;
use crate::common::error::PortalError;
use crate::AppState;

/// POST /run/:action
///
/// 実行は別タスクで行い、クライアントが切断してもチケット作成・パイプライン起動を
/// 途中で中断しない。
pub async fn run_action(State(state): State<AppState>, Path(action): Path<String>) -> Response {
    info!(action = %action, "Action requested");

    let orchestrator = state.orchestrator.clone();
    let task = tokio::spawn(async move { orchestrator.invoke(&action).await });

    match task.await {
        Ok(Ok(result)) => Json(result).into_response(),
        Ok(Err(failure)) => failure.into_response(),
        Err(e) => AppError(PortalError::Internal(e.to_string())).into_response(),
    }
}
