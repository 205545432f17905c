//! ChatApi trait implementation for HttpChatApi.

use async_trait::async_trait;
use tracing::debug;

use crate::types::{HealthReport, HistoryEntry, QueryReply, QueryRequest, SessionSummary};
use crate::{ApiError, ChatApi};

use super::client::HttpChatApi;

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn health(&self) -> Result<HealthReport, ApiError> {
        let request = self.http.get(self.url("health/"));
        self.fetch_json(request, "health").await
    }

    async fn query(
        &self,
        question: &str,
        session_id: Option<&str>,
    ) -> Result<QueryReply, ApiError> {
        debug!(new_session = session_id.is_none(), "submitting question");
        let request = self
            .http
            .post(self.url("query/"))
            .headers(self.auth_headers())
            .json(&QueryRequest {
                question,
                session_id,
            });
        self.fetch_json(request, "query").await
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>, ApiError> {
        let request = self
            .http
            .get(self.url("history/"))
            .headers(self.auth_headers());
        self.fetch_json(request, "list_sessions").await
    }

    async fn session_messages(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        let request = self
            .http
            .get(self.session_url(session_id, None)?)
            .headers(self.auth_headers());
        self.fetch_json(request, "session_messages").await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.session_url(session_id, Some("delete"))?)
            .headers(self.auth_headers());
        self.send_checked(request, "delete_session").await?;
        Ok(())
    }
}
