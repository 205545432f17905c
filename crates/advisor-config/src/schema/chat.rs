use serde::{Deserialize, Serialize};

/// Fixed texts and presentation limits used by the chat orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Bot message shown when a query fails.
    pub failure_notice: String,
    /// Bot message shown when the service answers with no text.
    pub empty_answer_notice: String,
    /// Sidebar titles longer than this are truncated (valid range: 8-200).
    pub title_preview_chars: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            failure_notice: "I apologize, but I encountered an error connecting to the backend. \
                             Please ensure the server is running and try again."
                .into(),
            empty_answer_notice: "I apologize, but I could not generate a response.".into(),
            title_preview_chars: 30,
        }
    }
}
