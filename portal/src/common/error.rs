//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! プローブ失敗はここには現れない（常に `up=false` の結果へ変換される）。
//! ここで扱うのはアクション実行・設定・認証など、呼び出し元へ伝播させる失敗のみ。

use axum::http::StatusCode;
use thiserror::Error;

use crate::types::action::TicketRef;

/// portal error type
#[derive(Debug, Error)]
pub enum PortalError {
    /// Required settings are missing
    #[error("{0}")]
    Config(String),

    /// Transport-level failure (connect, DNS, timeout, body read)
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Upstream returned a non-success status
    #[error("{service} responded with HTTP {status}")]
    Upstream {
        /// Upstream service name
        service: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Unknown action key
    #[error("unknown action: {0}")]
    InvalidAction(String),

    /// Bad or missing portal token
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        PortalError::Http(err.to_string())
    }
}

impl PortalError {
    /// Returns the message exposed to HTTP clients.
    ///
    /// Configuration and upstream failures are reported verbatim because the
    /// operator triggering an action needs to know what to fix.
    pub fn external_message(&self) -> String {
        match self {
            Self::InvalidAction(_) => "unknown action".to_string(),
            Self::Authentication(_) => "unauthorized: bad token".to_string(),
            Self::NotFound(msg) => msg.clone(),
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAction(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Http(_) | Self::Upstream { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// アクション実行の失敗
///
/// パイプライン起動が失敗しても、既に取得したチケット参照は捨てずに返す。
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ActionFailure {
    /// 失敗原因
    pub error: PortalError,
    /// 失敗前に取得済みのチケット参照（未到達なら `None`）
    pub ticket_ref: Option<TicketRef>,
}

impl ActionFailure {
    /// チケット作成前に失敗した場合（不明なアクションなど）
    pub fn before_ticket(error: PortalError) -> Self {
        Self {
            error,
            ticket_ref: None,
        }
    }

    /// チケット作成後に失敗した場合
    pub fn after_ticket(error: PortalError, ticket_ref: TicketRef) -> Self {
        Self {
            error,
            ticket_ref: Some(ticket_ref),
        }
    }
}

/// Result type alias
pub type PortalResult<T> = Result<T, PortalError>;
