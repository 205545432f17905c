//! Inputs to and outputs of [`ChatState::apply`](crate::ChatState::apply).

use advisor_api::{ApiError, HealthReport, HistoryEntry, QueryReply, SessionSummary};
use advisor_common::{Notification, SessionId};
use serde::{Deserialize, Serialize};

/// Identifies what was on screen when a request went out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTag {
    pub session: SessionId,
    pub generation: u64,
}

/// Something that happened: a user intent or a finished network task.
#[derive(Debug, Clone)]
pub enum Event {
    /// The chat screen opened.
    Started,
    DraftChanged(String),
    Submit,
    SwitchTo(SessionId),
    NewChat,
    RefreshSidebar,
    /// The user asked to delete a session; nothing is sent until confirmed.
    DeleteRequested(String),
    DeleteConfirmed,
    DeleteCancelled,

    HealthProbed(Result<HealthReport, ApiError>),
    QueryAnswered {
        tag: RequestTag,
        result: Result<QueryReply, ApiError>,
    },
    SessionsLoaded(Result<Vec<SessionSummary>, ApiError>),
    HistoryLoaded {
        tag: RequestTag,
        result: Result<Vec<HistoryEntry>, ApiError>,
    },
    SessionDeleted {
        session_id: String,
        result: Result<(), ApiError>,
    },
}

/// Work the runtime must do after a transition.
#[derive(Debug, Clone)]
pub enum Effect {
    ProbeHealth,
    /// Ask `question` in `tag.session` (`New` sends a null session id).
    Query {
        tag: RequestTag,
        question: String,
    },
    LoadSessions,
    /// Fetch the history of `tag.session`.
    LoadHistory {
        tag: RequestTag,
    },
    DeleteSession {
        session_id: String,
    },
    /// Ask the user to confirm deleting a session.
    ConfirmDelete {
        session_id: String,
        title: String,
    },
    Notify(Notification),
    /// The message list now belongs to a different session.
    SessionSwitched(SessionId),
}
