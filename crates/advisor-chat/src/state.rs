//! The chat store and its data model.

use advisor_api::{Citation, EntryKind, HistoryEntry, SessionSummary};
use advisor_common::{LocalId, SessionId};
use advisor_config::ChatConfig;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{Effect, Event, RequestTag};
use crate::health::BackendStatus;

/// Title the service gives sessions it has not named yet.
const UNTITLED: &str = "New Chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl From<EntryKind> for Role {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::User => Role::User,
            EntryKind::Bot => Role::Bot,
        }
    }
}

/// One displayed chat message. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: LocalId,
    pub role: Role,
    pub content: String,
    pub sources: Vec<Citation>,
    pub timestamp: String,
}

/// A persisted conversation as listed in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn from_summary(summary: SessionSummary) -> Self {
        let last_updated = DateTime::parse_from_rfc3339(&summary.updated_at)
            .ok()
            .map(|t| t.with_timezone(&Utc));
        let title = if summary.name.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            summary.name
        };
        Self {
            id: summary.id,
            title,
            last_updated,
        }
    }

    /// Title cut to `max` characters, with `...` appended when cut.
    pub fn display_title(&self, max: usize) -> String {
        if self.title.chars().count() <= max {
            return self.title.clone();
        }
        let mut short: String = self.title.chars().take(max).collect();
        short.push_str("...");
        short
    }
}

/// Everything the chat screen shows, and nothing else.
///
/// Mutated only through [`ChatState::apply`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatState {
    pub(crate) active_session: SessionId,
    pub(crate) messages: Vec<Message>,
    pub(crate) sidebar: Vec<Session>,
    pub(crate) backend_status: BackendStatus,
    pub(crate) pending: bool,
    /// History for the active session has been requested but not applied.
    pub(crate) loading_history: bool,
    pub(crate) draft: String,
    /// Session whose deletion is waiting for the user's answer.
    pub(crate) awaiting_confirmation: Option<String>,
    pub(crate) probe_issued: bool,
    /// Bumped on every switch; completions tagged with an older value are stale.
    pub(crate) generation: u64,
    pub(crate) next_local_id: u64,
    pub(crate) settings: ChatConfig,
}

impl ChatState {
    pub fn new(settings: ChatConfig) -> Self {
        Self {
            active_session: SessionId::New,
            messages: Vec::new(),
            sidebar: Vec::new(),
            backend_status: BackendStatus::Checking,
            pending: false,
            loading_history: false,
            draft: String::new(),
            awaiting_confirmation: None,
            probe_issued: false,
            generation: 0,
            next_local_id: 1,
            settings,
        }
    }

    /// Apply one event and return the effects to run, in order.
    pub fn apply(&mut self, event: Event, now: DateTime<Local>) -> Vec<Effect> {
        match event {
            Event::Started => self.on_started(),
            Event::DraftChanged(text) => {
                self.draft = text;
                Vec::new()
            }
            Event::Submit => self.on_submit(now),
            Event::SwitchTo(id) => self.switch_to(id),
            Event::NewChat => self.switch_to(SessionId::New),
            Event::RefreshSidebar => vec![Effect::LoadSessions],
            Event::DeleteRequested(id) => self.on_delete_requested(id),
            Event::DeleteConfirmed => self.on_delete_confirmed(),
            Event::DeleteCancelled => self.on_delete_cancelled(),
            Event::HealthProbed(result) => self.on_health_probed(result),
            Event::QueryAnswered { tag, result } => self.on_query_answered(tag, result, now),
            Event::SessionsLoaded(result) => self.on_sessions_loaded(result),
            Event::HistoryLoaded { tag, result } => self.on_history_loaded(tag, result),
            Event::SessionDeleted { session_id, result } => {
                self.on_session_deleted(session_id, result)
            }
        }
    }

    pub fn active_session(&self) -> &SessionId {
        &self.active_session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn sidebar(&self) -> &[Session] {
        &self.sidebar
    }

    pub fn backend_status(&self) -> BackendStatus {
        self.backend_status
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_loading_history(&self) -> bool {
        self.loading_history
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn awaiting_confirmation(&self) -> Option<&str> {
        self.awaiting_confirmation.as_deref()
    }

    pub fn settings(&self) -> &ChatConfig {
        &self.settings
    }

    /// Sidebar entry for a server id.
    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sidebar.iter().find(|s| s.id == id)
    }

    /// Whether a completion tagged `tag` still belongs to what is on screen.
    pub(crate) fn is_current(&self, tag: &RequestTag) -> bool {
        tag.generation == self.generation && tag.session == self.active_session
    }

    pub(crate) fn tag(&self) -> RequestTag {
        RequestTag {
            session: self.active_session.clone(),
            generation: self.generation,
        }
    }

    pub(crate) fn next_id(&mut self) -> LocalId {
        let id = LocalId(self.next_local_id);
        self.next_local_id += 1;
        id
    }

    pub(crate) fn push_message(
        &mut self,
        role: Role,
        content: String,
        sources: Vec<Citation>,
        timestamp: String,
    ) {
        let id = self.next_id();
        self.messages.push(Message {
            id,
            role,
            content,
            sources,
            timestamp,
        });
    }

    /// Build a message list from stored history, with fresh display keys.
    pub(crate) fn messages_from_history(&mut self, entries: Vec<HistoryEntry>) -> Vec<Message> {
        entries
            .into_iter()
            .map(|entry| Message {
                id: self.next_id(),
                role: entry.kind.into(),
                content: entry.content,
                sources: Vec::new(),
                timestamp: entry.timestamp,
            })
            .collect()
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(ChatConfig::default())
    }
}

/// Clock format used for message timestamps.
pub(crate) fn clock_time(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}
