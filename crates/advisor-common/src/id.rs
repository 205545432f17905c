use serde::{Deserialize, Serialize};
use std::fmt;

/// Short hex id used to correlate a request with its log lines.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Identity of a conversation.
///
/// `New` is the placeholder for a conversation the server has not created
/// yet. It serializes as `null`, which is also what the query endpoint
/// expects for "start a new session".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum SessionId {
    #[default]
    New,
    Persisted(String),
}

impl SessionId {
    pub fn persisted(id: impl Into<String>) -> Self {
        Self::Persisted(id.into())
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }

    /// The server-issued id, or `None` for the placeholder.
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::New => None,
            Self::Persisted(id) => Some(id),
        }
    }
}

impl From<Option<String>> for SessionId {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) => Self::Persisted(id),
            None => Self::New,
        }
    }
}

impl From<SessionId> for Option<String> {
    fn from(value: SessionId) -> Self {
        match value {
            SessionId::New => None,
            SessionId::Persisted(id) => Some(id),
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Persisted(id) => write!(f, "{id}"),
        }
    }
}

/// Display key for a message. Only unique within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalId(pub u64);

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
