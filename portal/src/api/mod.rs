//! REST APIハンドラー

pub mod actions;
pub mod disk;
pub mod error;
pub mod health;
pub mod status;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::AppState;

/// ルーターを作成
///
/// `/run/:action` のみトークン認証の対象。
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/run/:action", post(actions::run_action))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/status", get(status::get_status))
        .route("/ops/disk", get(disk::get_disk))
        .merge(protected)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
