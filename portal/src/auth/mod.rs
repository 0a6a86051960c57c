//! アクションエンドポイントの共有トークン認証
//!
//! `X-Portal-Token` ヘッダーまたは `token` クエリパラメータで送られた値を
//! 設定値と完全一致で比較する。`PORTAL_AUTH_TOKEN` が未設定の場合は
//! チェック自体を行わない（既定で開放。運用上の注意点として明記）。

use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::error::AppError;
use crate::common::error::PortalError;
use crate::AppState;

/// トークンヘッダー名
pub const TOKEN_HEADER: &str = "x-portal-token";

/// トークンのクエリパラメータ名
pub const TOKEN_QUERY_PARAM: &str = "token";

/// 送信されたトークンを取り出す（ヘッダー優先、空値は無視）
pub fn extract_token(request: &Request) -> Option<String> {
    if let Some(token) = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
    {
        return Some(token.to_string());
    }

    let query = request.uri().query()?;
    let params: HashMap<String, String> = serde_urlencoded::from_str(query).ok()?;
    params
        .get(TOKEN_QUERY_PARAM)
        .filter(|value| !value.is_empty())
        .cloned()
}

/// トークン認証ミドルウェア
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.config.auth_token.as_deref() else {
        return next.run(request).await;
    };

    if extract_token(&request).as_deref() == Some(expected) {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Rejected action request with bad token");
    AppError(PortalError::Authentication("bad token".to_string())).into_response()
}
