//! ステータスAPI

use axum::{extract::State, Json};

use crate::types::StatusReport;
use crate::AppState;

/// GET /api/status
///
/// 個々のプローブやCI連携が失敗しても常に200を返し、失敗内容は各項目に埋め込む。
pub async fn get_status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.aggregator.aggregate().await)
}
