//! GitLab client (pipeline trigger and pipeline lookup)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::PipelineTrigger;
use crate::common::error::{PortalError, PortalResult};
use crate::config::CiConfig;
use crate::types::{PipelineInfo, PipelineSnapshot, TriggeredPipeline};

/// Timeout for the trigger call
pub const TRIGGER_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the pipelines list call
pub const PIPELINES_TIMEOUT: Duration = Duration::from_secs(5);

/// Pipeline variable carrying the action key
pub const ACTION_VARIABLE: &str = "PORTAL_ACTION";

/// GitLab REST client
#[derive(Clone)]
pub struct GitLabClient {
    client: Client,
    config: CiConfig,
}

impl GitLabClient {
    /// Create a client sharing the given HTTP connection pool
    pub fn new(client: Client, config: CiConfig) -> Self {
        Self { client, config }
    }

    /// Fails with a configuration error naming every missing trigger setting.
    pub fn ensure_trigger_config(&self) -> PortalResult<()> {
        let missing = self.config.missing_trigger_settings();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PortalError::Config(format!(
                "GitLab is not configured: missing {}",
                missing.join(", ")
            )))
        }
    }

    fn project_url(&self) -> String {
        format!(
            "{}/api/v4/projects/{}",
            self.config.url, self.config.project_id
        )
    }

    /// Most recent pipeline for the configured ref.
    ///
    /// `None` when the API token is not configured or GitLab has nothing to
    /// report; [`PipelineInfo::unavailable`] when the call or its body fails.
    pub async fn latest_pipeline(&self) -> Option<PipelineInfo> {
        if !self.config.can_read_pipelines() {
            return None;
        }

        match self.fetch_latest_pipeline().await {
            Ok(snapshot) => snapshot.map(PipelineInfo::Latest),
            Err(e) => {
                warn!(error = %e, "GitLab pipelines API unavailable");
                Some(PipelineInfo::unavailable())
            }
        }
    }

    async fn fetch_latest_pipeline(&self) -> PortalResult<Option<PipelineSnapshot>> {
        let response = self
            .client
            .get(format!("{}/pipelines", self.project_url()))
            .header("PRIVATE-TOKEN", &self.config.api_token)
            .query(&[("per_page", "1"), ("ref", self.config.git_ref.as_str())])
            .timeout(PIPELINES_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "GitLab pipelines API returned non-success");
            return Ok(None);
        }

        let body: Value = response.json().await?;
        Ok(body
            .as_array()
            .and_then(|pipelines| pipelines.first())
            .map(snapshot_from_json))
    }
}

fn snapshot_from_json(pipeline: &Value) -> PipelineSnapshot {
    let text = |key: &str| {
        pipeline
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    PipelineSnapshot {
        id: pipeline.get("id").and_then(Value::as_u64),
        status: text("status"),
        git_ref: text("ref"),
        sha: text("sha"),
        web_url: text("web_url"),
    }
}

#[async_trait]
impl PipelineTrigger for GitLabClient {
    async fn trigger(
        &self,
        action: &str,
        variables: &[(&str, &str)],
    ) -> PortalResult<TriggeredPipeline> {
        self.ensure_trigger_config()?;

        let mut form = vec![
            ("token".to_string(), self.config.trigger_token.clone()),
            ("ref".to_string(), self.config.git_ref.clone()),
            (format!("variables[{}]", ACTION_VARIABLE), action.to_string()),
        ];
        form.extend(
            variables
                .iter()
                .map(|(key, value)| (format!("variables[{}]", key), value.to_string())),
        );

        let response = self
            .client
            .post(format!("{}/trigger/pipeline", self.project_url()))
            .form(&form)
            .timeout(TRIGGER_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Upstream {
                service: "GitLab",
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let pipeline = TriggeredPipeline {
            id: body.get("id").and_then(Value::as_u64),
            web_url: body
                .get("web_url")
                .and_then(Value::as_str)
                .map(str::to_string),
        };

        info!(
            action = %action,
            pipeline_id = ?pipeline.id,
            "GitLab pipeline triggered"
        );
        Ok(pipeline)
    }
}
