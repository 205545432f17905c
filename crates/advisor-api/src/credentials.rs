//! The signed-in user's token and where it is kept.
//!
//! Issuing tokens is someone else's job: the store only holds a token that
//! was obtained elsewhere, hands it to the HTTP client, and forgets it on
//! logout.

use std::fmt;
use std::path::{Path, PathBuf};

use advisor_common::AdvisorError;
use advisor_config::AuthConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Bearer token plus the name to greet the user with.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .finish()
    }
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Name for display, falling back to "User".
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("User")
    }
}

/// JSON file holding [`Credentials`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or `<config_dir>/advisor/credentials.json`.
    pub fn from_config(auth: &AuthConfig) -> Result<Self, AdvisorError> {
        match &auth.credentials_file {
            Some(path) => Ok(Self::new(path)),
            None => {
                let dir = advisor_config::toml_loader::config_dir()?;
                Ok(Self::new(dir.join("credentials.json")))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credentials. A missing file or blank token is `None`.
    pub fn load(&self) -> Result<Option<Credentials>, AdvisorError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let creds: Credentials = serde_json::from_str(&data).map_err(|e| {
            AdvisorError::Credentials(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        if creds.token.trim().is_empty() {
            debug!("credentials file has an empty token");
            return Ok(None);
        }
        Ok(Some(creds))
    }

    pub fn save(&self, credentials: &Credentials) -> Result<(), AdvisorError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credentials)
            .map_err(|e| AdvisorError::Credentials(format!("failed to serialize: {e}")))?;
        std::fs::write(&self.path, json)?;
        restrict_permissions(&self.path)?;
        info!("saved credentials to {}", self.path.display());
        Ok(())
    }

    /// Forget the stored credentials. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool, AdvisorError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("removed credentials at {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Find the user's credentials.
///
/// Resolution order:
/// 1. the environment variable named by `auth.token_env`
/// 2. the credentials file
///
/// Finding neither is [`AdvisorError::NotAuthenticated`]: the chat must not
/// be opened without an identity.
pub fn resolve_credentials(
    auth: &AuthConfig,
    store: &CredentialStore,
) -> Result<Credentials, AdvisorError> {
    resolve_from(std::env::var(&auth.token_env).ok(), store)
}

fn resolve_from(
    env_token: Option<String>,
    store: &CredentialStore,
) -> Result<Credentials, AdvisorError> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        debug!("using token from environment");
        return Ok(Credentials::new(token));
    }
    store.load()?.ok_or_else(|| {
        AdvisorError::NotAuthenticated(format!(
            "no token found; run `advisor login` (looked in {})",
            store.path().display()
        ))
    })
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AdvisorError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AdvisorError> {
    Ok(())
}
