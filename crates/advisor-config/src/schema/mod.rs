//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod chat;
mod system;

pub use api::*;
pub use chat::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for the advisor client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}
