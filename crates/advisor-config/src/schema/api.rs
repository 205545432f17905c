//! Backend endpoint and credential settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the question-answering service lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, without a trailing slash.
    pub base_url: String,
    /// Scheme word placed before the token in the `Authorization` header.
    pub auth_scheme: String,
    /// TCP connect timeout in seconds (valid range: 1-300).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds. Unset means no timeout.
    pub request_timeout_secs: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".into(),
            auth_scheme: "Token".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
        }
    }
}

/// Where the signed-in user's credential is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Credentials file override. Defaults to `<config_dir>/advisor/credentials.json`.
    pub credentials_file: Option<PathBuf>,
    /// Environment variable that, when set, supplies the token directly.
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_file: None,
            token_env: "ADVISOR_TOKEN".into(),
        }
    }
}
