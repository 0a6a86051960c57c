//! ディスク使用量レポートAPI

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::error::AppError;
use crate::common::error::PortalError;
use crate::reports;
use crate::AppState;

/// クエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct DiskQuery {
    /// 指定時はレポートの有無だけを返す
    pub check: Option<String>,
}

/// GET /ops/disk
pub async fn get_disk(
    State(state): State<AppState>,
    Query(query): Query<DiskQuery>,
) -> Result<Response, AppError> {
    let dir = &state.config.reports_dir;

    if query.check.as_deref().is_some_and(|v| !v.is_empty()) {
        let ready = !reports::list_reports(dir).await?.is_empty();
        return Ok(if ready {
            StatusCode::OK.into_response()
        } else {
            AppError(PortalError::NotFound("Report not ready".to_string())).into_response()
        });
    }

    match reports::latest_report(dir).await? {
        Some(report) => Ok(Json(report).into_response()),
        None => Err(AppError(PortalError::NotFound(
            "Report not found yet. Run the check first".to_string(),
        ))),
    }
}
