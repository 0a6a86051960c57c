//! Jira client (ticket creation)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::IssueTracker;
use crate::config::TrackerConfig;
use crate::types::TicketRef;

/// Timeout for the create-issue call
pub const TICKET_TIMEOUT: Duration = Duration::from_secs(30);

/// Jira REST client
#[derive(Clone)]
pub struct JiraClient {
    client: Client,
    config: TrackerConfig,
}

impl JiraClient {
    /// Create a client sharing the given HTTP connection pool
    pub fn new(client: Client, config: TrackerConfig) -> Self {
        Self { client, config }
    }

    fn issue_payload(&self, summary: &str, description: &str) -> Value {
        json!({
            "fields": {
                "project": {"key": self.config.project},
                "summary": summary,
                "description": description,
                "issuetype": {"name": self.config.issue_type},
            }
        })
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn create_ticket(&self, summary: &str, description: &str) -> TicketRef {
        if !self.config.is_enabled() {
            debug!("Jira is not configured, skipping ticket creation");
            return TicketRef::Disabled;
        }

        let url = format!("{}/rest/api/2/issue", self.config.url);
        let result = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header(ACCEPT, "application/json")
            .json(&self.issue_payload(summary, description))
            .timeout(TICKET_TIMEOUT)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Jira API error");
                return TicketRef::Failed;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Jira API error");
            return TicketRef::Failed;
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);
        if !is_json {
            return TicketRef::Acknowledged;
        }

        match response.json::<Value>().await {
            Ok(body) => body
                .get("key")
                .and_then(Value::as_str)
                .filter(|key| !key.is_empty())
                .map(|key| TicketRef::Created(key.to_string()))
                .unwrap_or(TicketRef::Acknowledged),
            Err(e) => {
                warn!(error = %e, "Jira returned an unreadable body for a created issue");
                TicketRef::Acknowledged
            }
        }
    }
}
