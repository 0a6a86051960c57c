//! 監視対象レジストリ
//!
//! 設定の `MONITOR_TARGETS`（`name|address` のカンマ区切り）と、
//! 常に末尾へ追加される既知サービス（Jira, GitLab, Grafana, Portal API）から
//! 順序付きの監視対象リストを組み立てる。キャッシュせず、要求ごとに再構築する。

use crate::config::PortalConfig;
use crate::types::TargetDescriptor;

/// 監視対象レジストリ
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    monitor_targets: String,
    jira_url: String,
    gitlab_url: String,
    grafana_url: String,
    portal_health_url: String,
}

impl TargetRegistry {
    /// 設定からレジストリを作成
    pub fn from_config(config: &PortalConfig) -> Self {
        Self {
            monitor_targets: config.monitor_targets.trim().to_string(),
            jira_url: config.tracker.url.clone(),
            gitlab_url: config.ci.url.clone(),
            grafana_url: config.grafana_url.clone(),
            portal_health_url: config.portal_health_url.clone(),
        }
    }

    /// 監視対象一覧を取得
    ///
    /// 設定順を保ち、既知サービスは常に最後に固定順で追加する。
    /// 設定が空の場合も既知サービスだけが同じ順序で返る。
    pub fn list_targets(&self) -> Vec<TargetDescriptor> {
        let mut targets = Vec::new();

        if !self.monitor_targets.is_empty() {
            targets.extend(parse_monitor_targets(&self.monitor_targets));
        }
        targets.extend(self.well_known_targets());

        targets
    }

    fn well_known_targets(&self) -> Vec<TargetDescriptor> {
        let mut targets = Vec::with_capacity(4);
        if !self.jira_url.is_empty() {
            targets.push(TargetDescriptor::new("Jira", self.jira_url.clone()));
        }
        if !self.gitlab_url.is_empty() {
            targets.push(TargetDescriptor::new("GitLab", self.gitlab_url.clone()));
        }
        targets.push(TargetDescriptor::new("Grafana", self.grafana_url.clone()));
        targets.push(TargetDescriptor::new(
            "Portal API",
            self.portal_health_url.clone(),
        ));
        targets
    }
}

/// `name|address` のカンマ区切りを解析（区切りのないエントリは黙って捨てる）
pub fn parse_monitor_targets(raw: &str) -> Vec<TargetDescriptor> {
    raw.split(',')
        .filter_map(|entry| entry.split_once('|'))
        .map(|(name, address)| TargetDescriptor::new(name.trim(), address.trim()))
        .collect()
}
