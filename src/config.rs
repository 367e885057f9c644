//! Client configuration parsing and validation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::{AppError, Result};

/// Environment variable consulted when `auth_token` is absent from the file.
pub const AUTH_TOKEN_ENV: &str = "WORTH_IPC_TOKEN";

fn default_ipc_name() -> String {
    "worth".into()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

/// Client configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    /// Named pipe / Unix socket identifier of the backend.
    #[serde(default = "default_ipc_name")]
    pub ipc_name: String,
    /// Upper bound for a single bridge call.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    /// Shared secret sent with every request, if the backend expects one.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Optional JSON command manifest describing the command table.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ipc_name: default_ipc_name(),
            request_timeout_seconds: default_request_timeout_seconds(),
            auth_token: None,
            manifest: None,
        }
    }
}

impl ClientConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill `auth_token` from [`AUTH_TOKEN_ENV`] when the file left it unset.
    pub fn apply_env_overrides(&mut self) {
        if self.auth_token.is_some() {
            return;
        }
        if let Ok(token) = env::var(AUTH_TOKEN_ENV) {
            if !token.is_empty() {
                debug!(var = AUTH_TOKEN_ENV, "auth token loaded from environment");
                self.auth_token = Some(token);
            }
        }
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn validate(&self) -> Result<()> {
        if self.ipc_name.trim().is_empty() {
            return Err(AppError::Config("ipc_name must not be empty".into()));
        }

        if self.request_timeout_seconds == 0 {
            return Err(AppError::Config(
                "request_timeout_seconds must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
