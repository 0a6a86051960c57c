//! 型定義

/// アクション関連の型
pub mod action;
/// CIパイプライン関連の型
pub mod pipeline;
/// 監視対象・プローブ結果の型
pub mod target;

pub use action::{ActionKey, ActionResult, ActionSpec, TicketRef, TriggeredPipeline};
pub use pipeline::{PipelineInfo, PipelineSnapshot};
pub use target::{ProbeResult, ProbeStatus, ServiceReport, StatusReport, TargetDescriptor};
