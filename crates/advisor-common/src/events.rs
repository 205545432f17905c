use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::SessionId;

/// Signals the chat orchestrator publishes to whatever presents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatSignal {
    /// The chat state changed; re-read it.
    StateChanged,
    /// The active conversation changed and the message list was replaced.
    SessionSwitched(SessionId),
    /// A deletion is waiting for the user to confirm or cancel.
    ConfirmDelete { session_id: String, title: String },
    /// A new notification was queued.
    Notified,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<ChatSignal>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatSignal> {
        self.sender.subscribe()
    }

    pub fn publish(&self, signal: ChatSignal) -> usize {
        self.sender.send(signal).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
