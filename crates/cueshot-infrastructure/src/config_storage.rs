//! Application configuration file storage (config.toml).

use crate::paths::CueshotPaths;
use cueshot_core::config::ConfigRoot;
use cueshot_core::{CueshotError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads `config.toml`. A missing file means "all defaults".
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a ConfigStorage with the default path (~/.config/cueshot/config.toml).
    pub fn new() -> Result<Self> {
        let path = CueshotPaths::config_file().map_err(|e| CueshotError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a ConfigStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ConfigRoot> {
        if !self.path.exists() {
            tracing::debug!("No config file at {}, using defaults", self.path.display());
            return Ok(ConfigRoot::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: ConfigRoot = toml::from_str(&content)?;
        Ok(config)
    }
}
