//! `secret.json` reader.
//!
//! ```json
//! { "gemini": { "api_key": "...", "model_name": "gemini-3-flash-preview" } }
//! ```
//!
//! Read-only. The file is plaintext, so a loose permission mode is reported
//! with a warning.

use crate::paths::CueshotPaths;
use cueshot_core::config::{GeminiSecret, SecretConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretStorageError {
    #[error("Secret file not found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read secret file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Secret file is not valid JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Could not determine the configuration directory")]
    ConfigDirNotFound,
}

impl SecretStorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Storage at `~/.config/cueshot/secret.json`.
    pub fn new() -> Result<Self, SecretStorageError> {
        CueshotPaths::secret_file()
            .map(Self::with_path)
            .map_err(|_| SecretStorageError::ConfigDirNotFound)
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the whole file. A missing file is [`SecretStorageError::NotFound`].
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        warn_if_readable_by_others(&self.path);
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The `gemini` section, or `None` when the file or the section is absent.
    pub fn load_gemini(&self) -> Result<Option<GeminiSecret>, SecretStorageError> {
        match self.load() {
            Ok(config) => Ok(config.gemini),
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!("No secret file at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(unix)]
fn warn_if_readable_by_others(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            tracing::warn!(
                "{} is accessible by other users (mode {:o}); consider chmod 600",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_readable_by_others(_path: &Path) {}
