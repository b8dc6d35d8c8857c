use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ApiError;

/// Fixed key the token is persisted under.
pub const TOKEN_KEY: &str = "authToken";

/// Read-only view of the signed-in session, handed to every client.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<Arc<str>>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl AsRef<str>) -> Self {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Self::anonymous();
        }
        Self {
            token: Some(Arc::from(token)),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn require_token(&self) -> Result<&str, ApiError> {
        self.token().ok_or(ApiError::MissingToken)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, rename = "authToken", skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

/// The single writer of persisted session state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable storage yields an anonymous session.
    pub fn load(&self) -> Session {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Session::anonymous();
        };

        match serde_json::from_str::<SessionFile>(&content) {
            Ok(file) => file
                .auth_token
                .map(Session::with_token)
                .unwrap_or_default(),
            Err(err) => {
                tracing::warn!(
                    "ignoring unreadable session file {}: {err}",
                    self.path.display()
                );
                Session::anonymous()
            }
        }
    }

    pub fn save_token(&self, token: &str) -> Result<Session> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("token must not be empty");
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session directory {}", parent.display())
            })?;
        }

        let file = SessionFile {
            auth_token: Some(token.to_string()),
        };
        std::fs::write(&self.path, serde_json::to_vec_pretty(&file)?)
            .with_context(|| format!("failed to write session file {}", self.path.display()))?;
        restrict_permissions(&self.path)?;

        Ok(Session::with_token(token))
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("failed to remove session file {}", self.path.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = store.load();
        assert!(!session.is_signed_in());
        assert!(matches!(
            session.require_token(),
            Err(ApiError::MissingToken)
        ));
    }

    #[test]
    fn save_then_load_round_trips_under_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = SessionStore::new(&path);

        store.save_token("  abc123 ").unwrap();
        assert_eq!(store.load().token(), Some("abc123"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[TOKEN_KEY], "abc123");
    }

    #[test]
    fn clear_signs_out_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save_token("abc").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.load().is_signed_in());
    }

    #[test]
    fn corrupt_or_blank_storage_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(!SessionStore::new(&path).load().is_signed_in());

        std::fs::write(&path, r#"{"authToken":"   "}"#).unwrap();
        assert!(!SessionStore::new(&path).load().is_signed_in());
    }

    #[test]
    fn empty_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.save_token("   ").is_err());
    }
}
