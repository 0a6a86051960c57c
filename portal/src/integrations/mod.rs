//! 外部サービス連携
//!
//! - 課題管理（Jira）: アクションの監査用チケット作成
//! - CI（GitLab）: パイプライン起動と直近パイプラインの取得
//!
//! アクション実行側からはtrait越しに扱い、テストでは差し替え可能にする。

pub mod gitlab;
pub mod jira;

use async_trait::async_trait;

use crate::common::error::PortalResult;
use crate::types::{TicketRef, TriggeredPipeline};

pub use gitlab::GitLabClient;
pub use jira::JiraClient;

/// チケット作成のtrait
///
/// 失敗はエラーではなく [`TicketRef::Failed`] / [`TicketRef::Disabled`] で表す。
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// チケットを作成
    async fn create_ticket(&self, summary: &str, description: &str) -> TicketRef;
}

/// パイプライン起動のtrait
///
/// 設定不足・通信エラー・非2xxはすべてエラーとして呼び出し元へ返す。
#[async_trait]
pub trait PipelineTrigger: Send + Sync {
    /// パイプラインを起動
    async fn trigger(
        &self,
        action: &str,
        variables: &[(&str, &str)],
    ) -> PortalResult<TriggeredPipeline>;
}
