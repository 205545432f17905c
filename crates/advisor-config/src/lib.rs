//! Advisor configuration system.
//!
//! TOML-based configuration for the chat client. All sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use advisor_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("talking to {}", config.api.base_url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AdvisorConfig, ApiConfig, AuthConfig, ChatConfig, LogLevel, LoggingConfig};

use advisor_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<AdvisorConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (e.g. a `--config` override).
pub fn load_config_from(path: &Path) -> Result<AdvisorConfig, ConfigError> {
    toml_loader::load_from_path(path)
}
