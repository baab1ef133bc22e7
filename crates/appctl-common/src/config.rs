//! User configuration for the appctl CLI.
//!
//! Values come from `$HOME/.appctl/config.json` when it exists and are then
//! overridden by `APPCTL_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{AppctlError, Result};

/// Root configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppctlConfig {
    /// Base URL of the platform API.
    pub api_url: String,
    /// Host that serves app git repositories.
    pub git_host: String,
    /// API key used for authentication.
    pub api_key: Option<String>,
    /// Email address of the logged-in account.
    pub user: Option<String>,
}

impl Default for AppctlConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            git_host: constants::DEFAULT_GIT_HOST.to_string(),
            api_key: None,
            user: None,
        }
    }
}

/// Account identity required by every API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email, compared against app owners.
    pub user: String,
    /// API key sent as the basic-auth password.
    pub api_key: String,
}

impl AppctlConfig {
    /// Loads the default config file, then applies the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(&constants::default_config_file())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads configuration from `path`, returning defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| AppctlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overrides fields from `lookup`, which maps variable names to values.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(constants::ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(host) = lookup(constants::ENV_GIT_HOST) {
            self.git_host = host;
        }
        if let Some(key) = lookup(constants::ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(user) = lookup(constants::ENV_USER) {
            self.user = Some(user);
        }
    }

    /// Returns the account credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppctlError::Config`] naming the missing setting.
    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = non_empty(self.api_key.as_deref()).ok_or_else(|| AppctlError::Config {
            message: format!("no API key configured; set {}", constants::ENV_API_KEY),
        })?;
        let user = non_empty(self.user.as_deref()).ok_or_else(|| AppctlError::Config {
            message: format!("no account email configured; set {}", constants::ENV_USER),
        })?;
        Ok(Credentials {
            user: user.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
