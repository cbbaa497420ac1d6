//! Admin token storage
//!
//! The bearer token is kept in a plain file under the user's config
//! directory (`<config dir>/homestretch/token`), readable only by its owner
//! on unix.

use std::path::{Path, PathBuf};

use crate::error::ClientError;

/// Application directory under the platform config dir
pub const APP_DIR: &str = "homestretch";

const TOKEN_FILE: &str = "token";

/// `<config dir>/homestretch`, if the platform has a config dir
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location
    pub fn default_location() -> Result<Self, ClientError> {
        config_dir()
            .map(|dir| Self::new(dir.join(TOKEN_FILE)))
            .ok_or_else(|| ClientError::Io("no config directory on this platform".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved token, `None` when logged out
    pub fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::Validation("token must not be empty".to_string()));
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{token}\n"))?;
        restrict_permissions(&self.path)?;

        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// Remove the token; returns whether one was stored
    pub fn clear(&self) -> Result<bool, ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
