//! Unified path management for sandchat files.
//!
//! All client-side state lives under one platform config directory:
//!
//! ```text
//! ~/.config/sandchat/          # Config directory (XDG on Linux)
//! ├── config.toml              # Client configuration
//! └── session_id               # Persisted session token
//! ```

use std::path::PathBuf;

use sandchat_core::{Result, SandchatError};

/// Unified path management for sandchat.
pub struct SandchatPaths;

impl SandchatPaths {
    /// Returns the sandchat configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/sandchat/`)
    /// - `Err(_)`: Could not determine the platform config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("sandchat"))
            .ok_or_else(|| SandchatError::config("Cannot find home directory"))
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session token.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session_id"))
    }
}
