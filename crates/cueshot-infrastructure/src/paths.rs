//! Unified path management for cueshot configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cueshot/           # Config directory (platform config dir)
//! ├── config.toml              # Inference settings (model, endpoint, timeout)
//! └── secret.json              # API keys
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Error, Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    #[error("Cannot find the configuration directory")]
    ConfigDirNotFound,
}

pub struct CueshotPaths;

impl CueshotPaths {
    const APP_DIR: &'static str = "cueshot";

    /// Returns the cueshot configuration directory (e.g. `~/.config/cueshot/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to `secret.json`.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
