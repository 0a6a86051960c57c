//! ステータス集約
//!
//! 全監視対象を並列にプローブし、レジストリ順のまま結果を並べる。
//! CIパイプライン情報の取得はプローブと独立に行い、どちらの失敗も他方を止めない。

use futures::future::join_all;
use tracing::{debug, info};

use super::ProbeEngine;
use crate::integrations::GitLabClient;
use crate::registry::TargetRegistry;
use crate::types::{ServiceReport, StatusReport};

/// ステータスアグリゲーター
#[derive(Clone)]
pub struct StatusAggregator {
    registry: TargetRegistry,
    engine: ProbeEngine,
    gitlab: GitLabClient,
    env_name: String,
    version: String,
}

impl StatusAggregator {
    /// 新しいアグリゲーターを作成
    pub fn new(
        registry: TargetRegistry,
        engine: ProbeEngine,
        gitlab: GitLabClient,
        env_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            engine,
            gitlab,
            env_name: env_name.into(),
            version: version.into(),
        }
    }

    /// 全監視対象をプローブしてレポートを作成
    ///
    /// 結果の順序は完了順ではなくレジストリ順。
    pub async fn aggregate(&self) -> StatusReport {
        let targets = self.registry.list_targets();
        debug!(count = targets.len(), "Probing monitor targets");

        let probes = join_all(targets.into_iter().map(|target| async move {
            let result = self.engine.probe(&target.address).await;
            ServiceReport { target, result }
        }));

        let (services, pipeline) = tokio::join!(probes, self.gitlab.latest_pipeline());

        let up = services.iter().filter(|s| s.result.up).count();
        info!(
            total = services.len(),
            up = up,
            down = services.len() - up,
            "Status aggregation completed"
        );

        StatusReport {
            ok: true,
            env: self.env_name.clone(),
            version: self.version.clone(),
            services,
            pipeline,
        }
    }
}
