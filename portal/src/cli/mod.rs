//! CLI module for the ops portal

pub mod serve;

use clap::{Parser, Subcommand};

/// Ops portal - status dashboard and maintenance actions for infrastructure hosts
#[derive(Parser, Debug)]
#[command(name = "ops-portal")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    PORTAL_HOST             Bind address (default: 0.0.0.0)
    PORTAL_PORT             Listen port (default: 8000, legacy: APP_PORT)
    PORTAL_LOG_LEVEL        Log level (default: info)
    PORTAL_AUTH_TOKEN       Shared secret for /run/<action> (unset = open)
    MONITOR_TARGETS         name|address,... targets to probe
    JIRA_URL, JIRA_TOKEN, JIRA_PROJECT, JIRA_ISSUE_TYPE
    GITLAB_URL, GITLAB_PROJECT_ID, GITLAB_REF, GITLAB_TRIGGER_TOKEN, GITLAB_API_TOKEN
    ENV_NAME, APP_VERSION
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the portal server
    Serve(serve::ServeArgs),
}
