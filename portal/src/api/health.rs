//! ポータル自身のヘルスチェック

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let now = Utc::now();
    let uptime_sec = (now - state.started_at).num_seconds().max(0);

    Json(json!({
        "ok": true,
        "env": state.config.env_name,
        "version": state.config.app_version,
        "now": now.to_rfc3339_opts(SecondsFormat::Micros, false),
        "started": state.started_at.to_rfc3339_opts(SecondsFormat::Micros, false),
        "uptime_sec": uptime_sec,
    }))
}
