//! Moving the message pane between sessions.

use advisor_api::{ApiError, HistoryEntry};
use advisor_common::SessionId;
use tracing::{debug, info, warn};

use crate::event::{Effect, RequestTag};
use crate::state::ChatState;

impl ChatState {
    /// Make `id` the active session.
    ///
    /// `New` clears the pane immediately. A persisted id keeps the current
    /// messages on screen until its history arrives, and sends wait until then.
    pub(crate) fn switch_to(&mut self, id: SessionId) -> Vec<Effect> {
        self.generation += 1;
        self.active_session = id;
        debug!(session = %self.active_session, generation = self.generation, "switching");

        match self.active_session {
            SessionId::New => {
                self.loading_history = false;
                self.messages.clear();
                vec![Effect::SessionSwitched(SessionId::New)]
            }
            SessionId::Persisted(_) => {
                self.loading_history = true;
                vec![Effect::LoadHistory { tag: self.tag() }]
            }
        }
    }

    pub(crate) fn on_history_loaded(
        &mut self,
        tag: RequestTag,
        result: Result<Vec<HistoryEntry>, ApiError>,
    ) -> Vec<Effect> {
        if !self.is_current(&tag) {
            debug!(session = %tag.session, "discarding stale history");
            return Vec::new();
        }

        self.loading_history = false;
        match result {
            Ok(entries) => {
                info!(session = %tag.session, count = entries.len(), "history loaded");
                self.messages = self.messages_from_history(entries);
                vec![Effect::SessionSwitched(self.active_session.clone())]
            }
            Err(e) => {
                warn!(session = %tag.session, "failed to load history: {e}");
                Vec::new()
            }
        }
    }
}
