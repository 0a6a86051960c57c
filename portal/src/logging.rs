//! ロギング初期化ユーティリティ

use tracing_subscriber::EnvFilter;

use crate::config::get_env_or;

/// tracing-subscriberを初期化
///
/// `RUST_LOG` があればそれを優先し、無ければ `PORTAL_LOG_LEVEL`（既定: `info`）を使う。
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(get_env_or("PORTAL_LOG_LEVEL", "info"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
