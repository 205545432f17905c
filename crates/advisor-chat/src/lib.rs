//! Chat session orchestration.
//!
//! Owns which conversation is active, the messages on screen, and the
//! sidebar of past sessions, and keeps them consistent with the server:
//!
//! - [`ChatState`] is the single store. Every change goes through
//!   [`ChatState::apply`], which performs no I/O and returns the
//!   [`Effect`]s the caller should run.
//! - [`Orchestrator`] runs those effects as tokio tasks against a
//!   [`ChatApi`](advisor_api::ChatApi) and feeds their completions back in,
//!   one at a time.
//!
//! Sends are optimistic: the user's message is shown before the server
//! answers, and when the server creates a session for the first message
//! only the session id is patched in; the displayed messages are kept.

mod dispatcher;
mod event;
mod health;
mod orchestrator;
mod sidebar;
mod state;
mod switching;

pub use event::{Effect, Event, RequestTag};
pub use health::BackendStatus;
pub use orchestrator::Orchestrator;
pub use state::{ChatState, Message, Role, Session};

pub use advisor_api::Citation;
pub use advisor_common::{LocalId, SessionId};
