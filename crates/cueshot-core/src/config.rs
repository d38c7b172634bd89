//! Inference configuration.
//!
//! The credential and endpoint settings are resolved once at startup into an
//! [`InferenceConfig`] that is handed to the client explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable named in the missing-credential message.
pub const CREDENTIAL_ENV_VAR: &str = "GEMINI_API_KEY";
/// Secondary environment variable accepted for the credential.
pub const FALLBACK_CREDENTIAL_ENV_VAR: &str = "API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Resolved settings for the inference client.
#[derive(Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Applies the optional settings from `config.toml`.
    pub fn apply_settings(mut self, settings: &InferenceSettings) -> Self {
        if let Some(model) = &settings.model {
            self.model = model.clone();
        }
        if let Some(base_url) = &settings.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(secs) = settings.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Root structure of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRoot {
    #[serde(default)]
    pub inference: InferenceSettings,
}

/// `[inference]` table of `config.toml`. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceSettings {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Root structure of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

/// Gemini API credentials stored in `secret.json`.
#[derive(Deserialize, Serialize, Clone)]
pub struct GeminiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl fmt::Debug for GeminiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSecret")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(!InferenceConfig::new(Some("   ".into())).has_credential());
        assert!(InferenceConfig::new(Some("abc".into())).has_credential());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = InferenceConfig::new(Some("super-secret".into()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_apply_settings_overrides_only_present_keys() {
        let settings: ConfigRoot = toml::from_str(
            r#"
            [inference]
            timeout_secs = 15
            "#,
        )
        .unwrap();

        let config = InferenceConfig::default().apply_settings(&settings.inference);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }
}
