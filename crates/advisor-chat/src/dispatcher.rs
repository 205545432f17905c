//! Sending a question: optimistic append, then reconcile with the reply.

use advisor_api::{ApiError, QueryReply};
use advisor_common::SessionId;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::event::{Effect, RequestTag};
use crate::health::BackendStatus;
use crate::state::{clock_time, ChatState, Role};

impl ChatState {
    /// Whether a submit right now would send anything.
    pub fn can_send(&self) -> bool {
        !self.pending
            && !self.loading_history
            && self.backend_status == BackendStatus::Connected
            && !self.draft.trim().is_empty()
    }

    pub(crate) fn on_submit(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        if !self.can_send() {
            debug!(
                pending = self.pending,
                loading_history = self.loading_history,
                status = ?self.backend_status,
                "submit ignored"
            );
            return Vec::new();
        }

        let question = std::mem::take(&mut self.draft);
        self.push_message(Role::User, question.clone(), Vec::new(), clock_time(now));
        self.pending = true;

        vec![Effect::Query {
            tag: self.tag(),
            question,
        }]
    }

    pub(crate) fn on_query_answered(
        &mut self,
        tag: RequestTag,
        result: Result<QueryReply, ApiError>,
        now: DateTime<Local>,
    ) -> Vec<Effect> {
        self.pending = false;

        if !self.is_current(&tag) {
            warn!(
                sent_in = %tag.session,
                active = %self.active_session,
                "discarding reply for a session no longer on screen"
            );
            // The server may still have created a session for it.
            let created = tag.session.is_new()
                && matches!(&result, Ok(reply) if created_session(reply).is_some());
            return if created {
                vec![Effect::LoadSessions]
            } else {
                Vec::new()
            };
        }

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("query failed: {e}");
                let notice = self.settings.failure_notice.clone();
                self.push_message(Role::Bot, notice, Vec::new(), clock_time(now));
                return Vec::new();
            }
        };

        let created = created_session(&reply).map(String::from);
        let answer = reply
            .answer
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| self.settings.empty_answer_notice.clone());
        self.push_message(Role::Bot, answer, reply.sources, clock_time(now));

        match created {
            Some(id) if tag.session.is_new() => {
                info!(session = %id, "server created session");
                self.active_session = SessionId::persisted(id);
                vec![Effect::LoadSessions]
            }
            _ => Vec::new(),
        }
    }
}

/// Session id the server reported, ignoring empty strings.
fn created_session(reply: &QueryReply) -> Option<&str> {
    reply.session_id.as_deref().filter(|id| !id.is_empty())
}
