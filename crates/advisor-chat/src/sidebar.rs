//! Sidebar loading and confirmed deletion.

use std::collections::HashSet;

use advisor_api::{ApiError, SessionSummary};
use advisor_common::{Notification, SessionId};
use tracing::{debug, info, warn};

use crate::event::Effect;
use crate::state::{ChatState, Session};

impl ChatState {
    pub(crate) fn on_sessions_loaded(
        &mut self,
        result: Result<Vec<SessionSummary>, ApiError>,
    ) -> Vec<Effect> {
        let summaries = match result {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!("failed to load sessions, keeping previous sidebar: {e}");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        self.sidebar = summaries
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .map(Session::from_summary)
            .collect();
        debug!(count = self.sidebar.len(), "sidebar refreshed");
        Vec::new()
    }

    pub(crate) fn on_delete_requested(&mut self, session_id: String) -> Vec<Effect> {
        let title = self
            .session(&session_id)
            .map(|s| s.title.clone())
            .unwrap_or_else(|| session_id.clone());
        self.awaiting_confirmation = Some(session_id.clone());
        vec![Effect::ConfirmDelete { session_id, title }]
    }

    pub(crate) fn on_delete_confirmed(&mut self) -> Vec<Effect> {
        match self.awaiting_confirmation.take() {
            Some(session_id) => vec![Effect::DeleteSession { session_id }],
            None => {
                debug!("delete confirmed with nothing awaiting confirmation");
                Vec::new()
            }
        }
    }

    pub(crate) fn on_delete_cancelled(&mut self) -> Vec<Effect> {
        if let Some(id) = self.awaiting_confirmation.take() {
            debug!(session = %id, "delete cancelled");
        }
        Vec::new()
    }

    pub(crate) fn on_session_deleted(
        &mut self,
        session_id: String,
        result: Result<(), ApiError>,
    ) -> Vec<Effect> {
        if let Err(e) = result {
            warn!(session = %session_id, "delete failed: {e}");
            return vec![Effect::Notify(Notification::error(
                "Could not delete chat",
                e.to_string(),
            ))];
        }

        info!(session = %session_id, "session deleted");
        self.sidebar.retain(|s| s.id != session_id);
        if self.active_session.server_id() == Some(session_id.as_str()) {
            return self.switch_to(SessionId::New);
        }
        Vec::new()
    }
}
