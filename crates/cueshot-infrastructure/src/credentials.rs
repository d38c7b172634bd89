//! Resolution of the [`InferenceConfig`] from the available sources.
//!
//! Credential lookup order (first hit wins):
//! 1. explicit key (command-line flag)
//! 2. `gemini.api_key` in secret.json
//! 3. `GEMINI_API_KEY`, then `API_KEY` in the environment
//!
//! A missing credential is not an error here; the client reports it when an
//! analysis is attempted.

use crate::config_storage::ConfigStorage;
use crate::secret_storage::SecretStorage;
use cueshot_core::config::{CREDENTIAL_ENV_VAR, FALLBACK_CREDENTIAL_ENV_VAR, InferenceConfig};
use cueshot_core::{CueshotError, Result};
use std::fmt;

/// Where the credential came from. Logged, never the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Explicit,
    SecretFile,
    Environment(&'static str),
    Missing,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Explicit => f.write_str("command line"),
            CredentialSource::SecretFile => f.write_str("secret.json"),
            CredentialSource::Environment(var) => write!(f, "environment ({var})"),
            CredentialSource::Missing => f.write_str("not configured"),
        }
    }
}

pub struct ConfigResolver<E> {
    secrets: Option<SecretStorage>,
    config: Option<ConfigStorage>,
    env: E,
}

impl ConfigResolver<fn(&str) -> Option<String>> {
    /// Resolver over the default file locations and the process environment.
    pub fn from_system() -> Self {
        let secrets = SecretStorage::new()
            .map_err(|e| tracing::warn!("Secret storage unavailable: {}", e))
            .ok();
        let config = ConfigStorage::new()
            .map_err(|e| tracing::warn!("Config storage unavailable: {}", e))
            .ok();
        Self {
            secrets,
            config,
            env: read_env,
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl<E> ConfigResolver<E>
where
    E: Fn(&str) -> Option<String>,
{
    pub fn new(secrets: Option<SecretStorage>, config: Option<ConfigStorage>, env: E) -> Self {
        Self {
            secrets,
            config,
            env,
        }
    }

    /// Builds the inference config, reporting where the key was found.
    pub fn resolve(
        &self,
        explicit_key: Option<String>,
    ) -> Result<(InferenceConfig, CredentialSource)> {
        let secret = match &self.secrets {
            Some(storage) => storage.load_gemini().map_err(|e| {
                CueshotError::config(format!("Failed to load {}: {}", storage.path().display(), e))
            })?,
            None => None,
        };

        let settings = match &self.config {
            Some(storage) => storage.load()?.inference,
            None => Default::default(),
        };

        let non_blank = |key: &String| !key.trim().is_empty();
        let (api_key, source) = if let Some(key) = explicit_key.filter(non_blank) {
            (Some(key), CredentialSource::Explicit)
        } else if let Some(key) = secret.as_ref().map(|s| s.api_key.clone()).filter(non_blank) {
            (Some(key), CredentialSource::SecretFile)
        } else if let Some(key) = (self.env)(CREDENTIAL_ENV_VAR).filter(non_blank) {
            (Some(key), CredentialSource::Environment(CREDENTIAL_ENV_VAR))
        } else if let Some(key) = (self.env)(FALLBACK_CREDENTIAL_ENV_VAR).filter(non_blank) {
            (
                Some(key),
                CredentialSource::Environment(FALLBACK_CREDENTIAL_ENV_VAR),
            )
        } else {
            (None, CredentialSource::Missing)
        };

        let mut config = InferenceConfig::new(api_key);
        if let Some(model) = secret.and_then(|s| s.model_name) {
            config = config.with_model(model);
        }
        let config = config.apply_settings(&settings);

        tracing::info!(
            credential = %source,
            model = config.model.as_str(),
            "Resolved inference configuration"
        );
        Ok((config, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn write_secret(dir: &TempDir, body: &str) -> SecretStorage {
        let path = dir.path().join("secret.json");
        fs::write(&path, body).unwrap();
        SecretStorage::with_path(path)
    }

    #[test]
    fn test_explicit_key_wins() {
        let dir = TempDir::new().unwrap();
        let secrets = write_secret(&dir, r#"{"gemini": {"api_key": "from-file"}}"#);
        let resolver = ConfigResolver::new(
            Some(secrets),
            None,
            env_of(&[("GEMINI_API_KEY", "from-env")]),
        );

        let (config, source) = resolver.resolve(Some("from-flag".into())).unwrap();
        assert_eq!(config.api_key(), Some("from-flag"));
        assert_eq!(source, CredentialSource::Explicit);
    }

    #[test]
    fn test_secret_file_before_environment() {
        let dir = TempDir::new().unwrap();
        let secrets = write_secret(
            &dir,
            r#"{"gemini": {"api_key": "from-file", "model_name": "gemini-2.5-pro"}}"#,
        );
        let resolver = ConfigResolver::new(
            Some(secrets),
            None,
            env_of(&[("GEMINI_API_KEY", "from-env")]),
        );

        let (config, source) = resolver.resolve(None).unwrap();
        assert_eq!(config.api_key(), Some("from-file"));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(source, CredentialSource::SecretFile);
    }

    #[test]
    fn test_environment_order() {
        let resolver = ConfigResolver::new(
            None,
            None,
            env_of(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]),
        );
        let (config, _) = resolver.resolve(None).unwrap();
        assert_eq!(config.api_key(), Some("primary"));

        let resolver = ConfigResolver::new(None, None, env_of(&[("API_KEY", "fallback")]));
        let (config, source) = resolver.resolve(None).unwrap();
        assert_eq!(config.api_key(), Some("fallback"));
        assert_eq!(source, CredentialSource::Environment("API_KEY"));
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let resolver = ConfigResolver::new(
            None,
            None,
            env_of(&[("GEMINI_API_KEY", "  "), ("API_KEY", "fallback")]),
        );
        let (config, _) = resolver.resolve(Some(String::new())).unwrap();
        assert_eq!(config.api_key(), Some("fallback"));
    }

    #[test]
    fn test_missing_everywhere_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let resolver = ConfigResolver::new(
            Some(SecretStorage::with_path(dir.path().join("secret.json"))),
            Some(ConfigStorage::with_path(dir.path().join("config.toml"))),
            env_of(&[]),
        );

        let (config, source) = resolver.resolve(None).unwrap();
        assert!(!config.has_credential());
        assert_eq!(source, CredentialSource::Missing);
    }

    #[test]
    fn test_corrupt_secret_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let secrets = write_secret(&dir, "{ nope");
        let resolver = ConfigResolver::new(Some(secrets), None, env_of(&[]));

        let err = resolver.resolve(None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_config_toml_overrides_model() {
        let dir = TempDir::new().unwrap();
        let secrets = write_secret(
            &dir,
            r#"{"gemini": {"api_key": "k", "model_name": "from-secret"}}"#,
        );
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[inference]\nmodel = \"from-toml\"\n").unwrap();

        let resolver = ConfigResolver::new(
            Some(secrets),
            Some(ConfigStorage::with_path(config_path)),
            env_of(&[]),
        );
        let (config, _) = resolver.resolve(None).unwrap();
        assert_eq!(config.model, "from-toml");
    }
}
