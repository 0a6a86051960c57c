//! Ops portal server entry point

use clap::Parser;
use ops_portal::cli::{serve::ServeArgs, Cli, Commands};
use ops_portal::config::PortalConfig;
use ops_portal::{logging, server, AppState};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("failed to initialize logging: {}", e);
    }

    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::default(),
    };
    let config = args.apply(PortalConfig::from_env());

    info!(
        version = %config.app_version,
        env = %config.env_name,
        "Ops portal v{}",
        env!("CARGO_PKG_VERSION")
    );
    if config.auth_token.is_none() {
        warn!("PORTAL_AUTH_TOKEN is not set; action endpoints are open");
    }
    if !config.tracker.is_enabled() {
        info!("Jira is not configured; tickets will be reported as JIRA_DISABLED");
    }

    let bind_addr = format!("{}:{}", config.host, config.port);
    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(state, &bind_addr).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
