//! Client side of the question-answering service's HTTP contract.
//!
//! Provides:
//! - [`ChatApi`], the seam the chat orchestrator talks through
//! - [`HttpChatApi`], the reqwest implementation of it
//! - the JSON wire types for health, query, history and deletion
//! - [`CredentialStore`] for the signed-in user's token

pub mod credentials;
pub mod http;
pub mod types;

use async_trait::async_trait;

pub use credentials::{resolve_credentials, CredentialStore, Credentials};
pub use http::HttpChatApi;
pub use types::{
    Citation, EntryKind, HealthReport, HistoryEntry, QueryReply, QueryRequest, SessionSummary,
};

/// Operations the orchestrator needs from the backend.
///
/// Every call is independent; implementations must not retry.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET /health/`. Unauthenticated.
    async fn health(&self) -> Result<HealthReport, ApiError>;

    /// `POST /query/`. `session_id` is `None` to start a new session.
    async fn query(&self, question: &str, session_id: Option<&str>)
        -> Result<QueryReply, ApiError>;

    /// `GET /history/`.
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>, ApiError>;

    /// `GET /history/{id}/`.
    async fn session_messages(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `DELETE /history/{id}/delete/`.
    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unauthorized (HTTP {0})")]
    Unauthorized(u16),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}
