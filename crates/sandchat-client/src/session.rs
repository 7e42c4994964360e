//! Persisted session identity.
//!
//! The backend keys all conversation state on an opaque session token the
//! client supplies. The token is generated once per profile, written to
//! disk, and reused on every subsequent start; it is immutable for the
//! lifetime of the profile and never expires at the protocol level.

use std::fs;
use std::path::Path;

use sandchat_core::Result;
use uuid::Uuid;

use crate::paths::SandchatPaths;

/// A stable, opaque session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    token: String,
}

impl SessionIdentity {
    /// The token sent on every request.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Loads the profile's session token, generating and persisting a new
    /// one when none exists yet.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&SandchatPaths::session_file()?)
    }

    /// Same as [`load_or_create`], against an explicit file path.
    ///
    /// [`load_or_create`]: SessionIdentity::load_or_create
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if let Ok(existing) = fs::read_to_string(path) {
            let token = existing.trim();
            if !token.is_empty() {
                return Ok(Self {
                    token: token.to_string(),
                });
            }
        }

        let token = Uuid::new_v4().to_string();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &token)?;
        tracing::debug!(target: "session", "Generated new session token");

        Ok(Self { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_and_persists_token() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile").join("session_id");

        let identity = SessionIdentity::load_or_create_at(&path).unwrap();
        assert!(!identity.token().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), identity.token());
    }

    #[test]
    fn test_reuses_existing_token() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session_id");

        let first = SessionIdentity::load_or_create_at(&path).unwrap();
        let second = SessionIdentity::load_or_create_at(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tolerates_surrounding_whitespace() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session_id");
        fs::write(&path, "  abc-123\n").unwrap();

        let identity = SessionIdentity::load_or_create_at(&path).unwrap();
        assert_eq!(identity.token(), "abc-123");
    }

    #[test]
    fn test_empty_file_regenerates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session_id");
        fs::write(&path, "\n").unwrap();

        let identity = SessionIdentity::load_or_create_at(&path).unwrap();
        assert!(!identity.token().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), identity.token());
    }
}
