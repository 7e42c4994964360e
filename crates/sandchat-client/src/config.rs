//! Client configuration.
//!
//! Loaded from `config.toml` under the sandchat config directory when
//! present, with serde defaults for every field, then overridden by
//! environment variables. A missing file is not an error.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use sandchat_core::Result;
use serde::{Deserialize, Serialize};

use crate::paths::SandchatPaths;

/// Where the assistant backend mounts its API by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Client-side settings for talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the chat endpoints are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default location, applying
    /// environment overrides (`SANDCHAT_BASE_URL`).
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&SandchatPaths::config_file()?)?;
        config.apply_overrides(env::var("SANDCHAT_BASE_URL").ok());
        Ok(config)
    }

    /// Loads configuration from an explicit path; a missing file yields
    /// the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Applies explicit overrides on top of whatever was loaded.
    pub fn apply_overrides(&mut self, base_url: Option<String>) {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
    }

    /// The per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
