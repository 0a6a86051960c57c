//! Configuration management via environment variables
//!
//! Settings are read once at startup into [`PortalConfig`] and shared read-only
//! between requests. Empty values are treated the same as unset variables.

use std::path::PathBuf;

/// Default metrics dashboard probed as a well-known target
pub const DEFAULT_GRAFANA_URL: &str = "https://grafana.feebee.ru";

/// Default portal self-check probed as a well-known target
pub const DEFAULT_PORTAL_HEALTH_URL: &str = "https://portal.feebee.ru/health";

/// Get a non-empty environment variable
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with fallback to a secondary name
///
/// If the primary variable is set, returns its value.
/// If only the fallback variable is set, returns its value.
///
/// # Arguments
/// * `name` - The preferred environment variable name
/// * `fallback` - The secondary environment variable name
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set (or both are empty)
pub fn get_env_with_fallback(name: &str, fallback: &str) -> Option<String> {
    get_env(name).or_else(|| get_env(fallback))
}

/// Get an environment variable or a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    name: &str,
    fallback: &str,
    default: T,
) -> T {
    get_env_with_fallback(name, fallback)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a base URL with trailing slashes removed (empty if unset)
pub fn get_base_url(name: &str) -> String {
    get_env(name)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// Issue tracker (Jira) settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Base URL without trailing slash
    pub url: String,
    /// Bearer token
    pub token: String,
    /// Project key
    pub project: String,
    /// Issue type name
    pub issue_type: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            project: "OPS".to_string(),
            issue_type: "Task".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load tracker settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: get_base_url("JIRA_URL"),
            token: get_env_or("JIRA_TOKEN", ""),
            project: get_env_or("JIRA_PROJECT", "OPS"),
            issue_type: get_env_or("JIRA_ISSUE_TYPE", "Task"),
        }
    }

    /// Ticketing is enabled only when URL, token and project are all present.
    pub fn is_enabled(&self) -> bool {
        !self.url.is_empty() && !self.token.is_empty() && !self.project.is_empty()
    }
}

/// CI (GitLab) settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiConfig {
    /// Base URL without trailing slash
    pub url: String,
    /// Project id
    pub project_id: String,
    /// Ref used for triggers and pipeline lookup
    pub git_ref: String,
    /// Pipeline trigger token
    pub trigger_token: String,
    /// Private API token for reading pipelines
    pub api_token: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            project_id: String::new(),
            git_ref: "main".to_string(),
            trigger_token: String::new(),
            api_token: String::new(),
        }
    }
}

impl CiConfig {
    /// Load CI settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: get_base_url("GITLAB_URL"),
            project_id: get_env_or("GITLAB_PROJECT_ID", ""),
            git_ref: get_env_or("GITLAB_REF", "main"),
            trigger_token: get_env_or("GITLAB_TRIGGER_TOKEN", ""),
            api_token: get_env_or("GITLAB_API_TOKEN", ""),
        }
    }

    /// Names of the settings a pipeline trigger needs but does not have.
    pub fn missing_trigger_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_empty() {
            missing.push("GITLAB_URL");
        }
        if self.project_id.is_empty() {
            missing.push("GITLAB_PROJECT_ID");
        }
        if self.trigger_token.is_empty() {
            missing.push("GITLAB_TRIGGER_TOKEN");
        }
        missing
    }

    /// Pipeline lookup needs the API token, URL and project id.
    pub fn can_read_pipelines(&self) -> bool {
        !self.api_token.is_empty() && !self.url.is_empty() && !self.project_id.is_empty()
    }
}

/// Portal configuration loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Shared secret for the action endpoint (`None` disables the check)
    pub auth_token: Option<String>,
    /// Issue tracker settings
    pub tracker: TrackerConfig,
    /// CI settings
    pub ci: CiConfig,
    /// Metrics dashboard URL
    pub grafana_url: String,
    /// Portal self-check URL
    pub portal_health_url: String,
    /// Raw `MONITOR_TARGETS` value
    pub monitor_targets: String,
    /// Environment label
    pub env_name: String,
    /// Version label
    pub app_version: String,
    /// Directory holding `check_disk_*.json` reports
    pub reports_dir: PathBuf,
    /// Static files root
    pub static_dir: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            auth_token: None,
            tracker: TrackerConfig::default(),
            ci: CiConfig::default(),
            grafana_url: DEFAULT_GRAFANA_URL.to_string(),
            portal_health_url: DEFAULT_PORTAL_HEALTH_URL.to_string(),
            monitor_targets: String::new(),
            env_name: "Prod".to_string(),
            app_version: "dev".to_string(),
            reports_dir: PathBuf::from("/opt/portal/static/reports"),
            static_dir: PathBuf::from("/opt/portal/static"),
        }
    }
}

impl PortalConfig {
    /// Load portal configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: get_env_or("PORTAL_HOST", &defaults.host),
            port: get_env_with_fallback_parse("PORTAL_PORT", "APP_PORT", defaults.port),
            auth_token: get_env("PORTAL_AUTH_TOKEN"),
            tracker: TrackerConfig::from_env(),
            ci: CiConfig::from_env(),
            grafana_url: get_env("GRAFANA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.grafana_url),
            portal_health_url: get_env_or("PORTAL_HEALTH_URL", &defaults.portal_health_url),
            monitor_targets: get_env_or("MONITOR_TARGETS", "").trim().to_string(),
            env_name: get_env_or("ENV_NAME", &defaults.env_name),
            app_version: get_env_with_fallback("APP_VERSION", "CI_COMMIT_SHORT_SHA")
                .unwrap_or(defaults.app_version),
            reports_dir: get_env("PORTAL_REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            static_dir: get_env("PORTAL_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}
