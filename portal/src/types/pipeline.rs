//! CIパイプライン情報

use serde::{Deserialize, Serialize};

/// 直近のパイプライン実行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    /// パイプラインID
    pub id: Option<u64>,
    /// ステータス（`success`, `running` など）
    pub status: Option<String>,
    /// ブランチ/タグ
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// コミットSHA
    pub sha: Option<String>,
    /// Web UIのURL
    pub web_url: Option<String>,
}

/// ステータスレポートに載せるパイプライン情報
///
/// 出力専用。`Latest` は任意のオブジェクトに一致するため `Deserialize` は実装しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PipelineInfo {
    /// 取得成功
    Latest(PipelineSnapshot),
    /// 取得失敗マーカー `{"error": "unavailable"}`
    Unavailable {
        /// 常に `"unavailable"`
        error: String,
    },
}

impl PipelineInfo {
    /// 取得失敗マーカー
    pub fn unavailable() -> Self {
        PipelineInfo::Unavailable {
            error: "unavailable".to_string(),
        }
    }
}
