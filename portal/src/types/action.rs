//! メンテナンスアクション定義
//!
//! アクションはビルド時に固定された閉じた集合で、実行時に追加できない。

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::common::error::PortalError;

const JIRA_HOST: &str = "jira.feebee.ru";
const PORTAL_HOST: &str = "portal.feebee.ru";

/// 実行可能なアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    /// Jiraコンテナ再起動
    RestartJira,
    /// ポータルコンテナ再起動
    RestartPortal,
    /// ポータルのバックアップ
    BackupPortal,
    /// ポータルホストのディスク使用量チェック
    CheckDisk,
}

/// アクションの説明と実行パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// チケット件名
    pub summary: &'static str,
    /// チケット本文
    pub description: &'static str,
    /// パイプライン変数として渡す追加パラメータ
    pub extra_params: &'static [(&'static str, &'static str)],
}

impl ActionKey {
    /// 全アクション
    pub const ALL: [ActionKey; 4] = [
        ActionKey::RestartJira,
        ActionKey::RestartPortal,
        ActionKey::BackupPortal,
        ActionKey::CheckDisk,
    ];

    /// URL/パイプライン変数で使うキー
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKey::RestartJira => "restart_jira",
            ActionKey::RestartPortal => "restart_portal",
            ActionKey::BackupPortal => "backup_portal",
            ActionKey::CheckDisk => "check_disk",
        }
    }

    /// アクション定義を取得
    pub fn spec(&self) -> ActionSpec {
        match self {
            ActionKey::RestartJira => ActionSpec {
                summary: "Restart Jira",
                description: "Restart the Jira container",
                extra_params: &[("HOST", JIRA_HOST)],
            },
            ActionKey::RestartPortal => ActionSpec {
                summary: "Restart Portal",
                description: "Restart the portal container",
                extra_params: &[("HOST", PORTAL_HOST)],
            },
            ActionKey::BackupPortal => ActionSpec {
                summary: "Backup Portal",
                description: "Portal backup requested",
                extra_params: &[("HOST", PORTAL_HOST)],
            },
            ActionKey::CheckDisk => ActionSpec {
                summary: "Check Disk Portal",
                description: "Check free disk space on the portal host",
                extra_params: &[("HOST", PORTAL_HOST)],
            },
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKey {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PortalError::InvalidAction(s.to_string()))
    }
}

/// チケット作成の結果
///
/// 失敗してもエラーにはせず、センチネル値として返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketRef {
    /// 作成済み（レスポンスに含まれていたチケットキー）
    Created(String),
    /// 作成成功だがキーが取得できなかった
    Acknowledged,
    /// チケット連携が未設定
    Disabled,
    /// 作成失敗（非2xxまたは通信エラー）
    Failed,
}

impl TicketRef {
    /// JSONに載せる文字列表現
    pub fn as_str(&self) -> &str {
        match self {
            TicketRef::Created(key) => key,
            TicketRef::Acknowledged => "JIRA_OK",
            TicketRef::Disabled => "JIRA_DISABLED",
            TicketRef::Failed => "JIRA_ERROR",
        }
    }
}

impl fmt::Display for TicketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TicketRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 起動したパイプライン
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggeredPipeline {
    /// パイプラインID（レスポンスに無ければ `None`）
    pub id: Option<u64>,
    /// Web UIのURL
    pub web_url: Option<String>,
}

/// アクション実行結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    /// 常に `true`
    pub ok: bool,
    /// チケット参照またはセンチネル
    pub ticket_ref: TicketRef,
    /// パイプラインID
    pub pipeline_id: Option<u64>,
    /// パイプラインURL
    pub pipeline_url: Option<String>,
}
