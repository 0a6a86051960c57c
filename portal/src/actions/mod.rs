//! アクション実行
//!
//! 1回の実行で2つの外部副作用を固定順に行う。
//!
//! 1. チケット作成（ベストエフォート。失敗してもセンチネル値で続行）
//! 2. パイプライン起動（本体。失敗は取得済みチケット参照と共に呼び出し元へ返す）
//!
//! トランザクションではなく、2つの独立した呼び出しの結果を組み合わせる。

use std::sync::Arc;

use tracing::{error, info};

use crate::common::error::ActionFailure;
use crate::integrations::{IssueTracker, PipelineTrigger};
use crate::types::{ActionKey, ActionResult};

/// アクションオーケストレーター
#[derive(Clone)]
pub struct ActionOrchestrator {
    tracker: Arc<dyn IssueTracker>,
    trigger: Arc<dyn PipelineTrigger>,
}

impl ActionOrchestrator {
    /// 新しいオーケストレーターを作成
    pub fn new(tracker: Arc<dyn IssueTracker>, trigger: Arc<dyn PipelineTrigger>) -> Self {
        Self { tracker, trigger }
    }

    /// アクションを実行
    ///
    /// 不明なキーは副作用なしで即座に `InvalidAction` を返す。
    pub async fn invoke(&self, action_key: &str) -> Result<ActionResult, ActionFailure> {
        let action: ActionKey = action_key.parse().map_err(ActionFailure::before_ticket)?;
        let spec = action.spec();

        let ticket_ref = self
            .tracker
            .create_ticket(spec.summary, spec.description)
            .await;
        info!(action = %action, ticket = %ticket_ref, "Ticket step finished");

        let pipeline = match self
            .trigger
            .trigger(action.as_str(), spec.extra_params)
            .await
        {
            Ok(pipeline) => pipeline,
            Err(e) => {
                error!(
                    action = %action,
                    ticket = %ticket_ref,
                    error = %e,
                    "Pipeline trigger failed"
                );
                return Err(ActionFailure::after_ticket(e, ticket_ref));
            }
        };

        Ok(ActionResult {
            ok: true,
            ticket_ref,
            pipeline_id: pipeline.id,
            pipeline_url: pipeline.web_url,
        })
    }
}
