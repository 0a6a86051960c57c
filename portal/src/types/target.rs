//! 監視対象とプローブ結果

use serde::{Deserialize, Serialize};

use super::pipeline::PipelineInfo;

/// 監視対象エンドポイント
///
/// `address` は未解析の文字列（`tcp://host:port`、`http(s)://...`、`host[:port]`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// 表示名
    pub name: String,
    /// エンドポイント文字列
    #[serde(rename = "target")]
    pub address: String,
}

impl TargetDescriptor {
    /// 新しい監視対象を作成
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// プローブのステータス値
///
/// HTTPステータスコード、TCP接続成功時の `"open"`、またはエラー説明文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeStatus {
    /// HTTPステータスコード
    Code(u16),
    /// `"open"` またはエラー説明文
    Text(String),
}

impl ProbeStatus {
    /// TCP接続成功
    pub fn open() -> Self {
        ProbeStatus::Text("open".to_string())
    }
}

/// 単一プローブの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// 稼働中かどうか
    pub up: bool,
    /// ステータス
    pub status: ProbeStatus,
    /// プローブ全体の経過時間（ミリ秒）。失敗時も必ず記録する
    pub latency_ms: u64,
}

impl ProbeResult {
    /// 失敗結果を作成
    pub fn down(reason: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            up: false,
            status: ProbeStatus::Text(reason.into()),
            latency_ms,
        }
    }
}

/// 監視対象とプローブ結果を平坦にまとめたレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReport {
    /// 監視対象
    #[serde(flatten)]
    pub target: TargetDescriptor,
    /// プローブ結果
    #[serde(flatten)]
    pub result: ProbeResult,
}

/// `/api/status` のレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// 常に `true`（部分的な失敗は各サービスに埋め込む）
    pub ok: bool,
    /// 環境名
    pub env: String,
    /// アプリケーションバージョン
    pub version: String,
    /// レジストリ順のサービス一覧
    pub services: Vec<ServiceReport>,
    /// 直近のCIパイプライン（未設定なら `null`）
    pub pipeline: Option<PipelineInfo>,
}
