//! ヘルスチェック
//!
//! 監視対象ごとの単発プローブ（TCP/HTTP）と、全対象＋CIパイプライン情報を
//! 1つのステータスレポートにまとめる集約処理を提供する。

pub mod aggregator;
pub mod probe;

pub use aggregator::StatusAggregator;
pub use probe::ProbeEngine;
