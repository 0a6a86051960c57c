//! Ops Portal Server
//!
//! インフラホスト群のステータスダッシュボードと、リモート実行する
//! メンテナンスアクション（再起動・バックアップ・ディスクチェック）を提供する。

#![warn(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// 共通型定義（エラー型）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// メンテナンスアクション実行
pub mod actions;

/// アクションエンドポイントの共有トークン認証
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ヘルスチェック（プローブと集約）
pub mod health;

/// 外部サービス連携（Jira / GitLab）
pub mod integrations;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 監視対象レジストリ
pub mod registry;

/// ディスク使用量レポート
pub mod reports;

/// axumサーバー起動
pub mod server;

/// 型定義
pub mod types;

use common::error::{PortalError, PortalResult};
use config::PortalConfig;
use health::{ProbeEngine, StatusAggregator};
use integrations::{GitLabClient, JiraClient};
use registry::TargetRegistry;

/// アプリケーション状態
///
/// 起動時に一度だけ読み込んだ設定以外、リクエスト間で共有する可変状態は持たない。
#[derive(Clone)]
pub struct AppState {
    /// 起動時に読み込んだ設定
    pub config: Arc<PortalConfig>,
    /// ステータスアグリゲーター
    pub aggregator: StatusAggregator,
    /// アクションオーケストレーター
    pub orchestrator: actions::ActionOrchestrator,
    /// 起動時刻
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 設定からアプリケーション状態を構築
    pub fn from_config(config: PortalConfig) -> PortalResult<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| PortalError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config, http_client))
    }

    /// 既存のHTTPクライアントを使って構築
    pub fn with_client(config: PortalConfig, http_client: reqwest::Client) -> Self {
        let gitlab = GitLabClient::new(http_client.clone(), config.ci.clone());
        let jira = JiraClient::new(http_client.clone(), config.tracker.clone());

        let aggregator = StatusAggregator::new(
            TargetRegistry::from_config(&config),
            ProbeEngine::new(http_client.clone()),
            gitlab.clone(),
            config.env_name.clone(),
            config.app_version.clone(),
        );
        let orchestrator = actions::ActionOrchestrator::new(Arc::new(jira), Arc::new(gitlab));

        Self {
            config: Arc::new(config),
            aggregator,
            orchestrator,
            started_at: Utc::now(),
        }
    }
}
