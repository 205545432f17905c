//! JSON wire types for the `/api` endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// `GET /health/` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub neo4j_connected: bool,
    #[serde(default)]
    pub documents_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// Healthy service, graph store connected, documents loaded.
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.neo4j_connected && self.documents_loaded
    }

    /// Human-readable detail the service attached, if any.
    pub fn detail(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// A source passage backing an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub content: String,
    /// Page reference when the service knows it. Either a number or a label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<serde_json::Value>,
}

impl Citation {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            page: None,
        }
    }
}

/// `POST /query/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
    /// `null` asks the server to create a session.
    pub session_id: Option<&'a str>,
}

/// `POST /query/` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<Citation>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// One row of `GET /history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Who wrote a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    User,
    #[serde(alias = "assistant")]
    Bot,
}

/// One row of `GET /history/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Citation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Citation>>::deserialize(deserializer)?.unwrap_or_default())
}
