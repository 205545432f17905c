//! One-shot backend readiness probe.
//!
//! The probe runs once when the chat opens. Its outcome is sticky until
//! the process restarts, and nothing retries it.

use advisor_api::{ApiError, HealthReport};
use advisor_common::Notification;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::event::Effect;
use crate::state::ChatState;

/// Whether the backend can take questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    /// The probe has not answered yet.
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "Connecting...",
            BackendStatus::Connected => "Connected",
            BackendStatus::Disconnected => "Offline",
        }
    }
}

impl ChatState {
    pub(crate) fn on_started(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.probe_issued {
            self.probe_issued = true;
            self.backend_status = BackendStatus::Checking;
            effects.push(Effect::ProbeHealth);
        }
        effects.push(Effect::LoadSessions);
        effects
    }

    pub(crate) fn on_health_probed(
        &mut self,
        result: Result<HealthReport, ApiError>,
    ) -> Vec<Effect> {
        if self.backend_status != BackendStatus::Checking {
            warn!(status = ?self.backend_status, "ignoring repeated health result");
            return Vec::new();
        }

        let detail = match result {
            Ok(report) if report.is_ready() => {
                info!("backend connected");
                self.backend_status = BackendStatus::Connected;
                return Vec::new();
            }
            Ok(report) => {
                warn!(status = %report.status, neo4j = report.neo4j_connected,
                    documents = report.documents_loaded, "backend not ready");
                report
                    .detail()
                    .map(String::from)
                    .unwrap_or_else(|| format!("service reported status '{}'", report.status))
            }
            Err(e) => {
                warn!("health check failed: {e}");
                e.to_string()
            }
        };

        self.backend_status = BackendStatus::Disconnected;
        vec![Effect::Notify(Notification::warning(
            "Backend server is offline",
            detail,
        ))]
    }
}
