//! Error types for the Cueshot application.

use crate::inference::InferenceError;
use crate::session::SessionError;
use crate::upload::UploadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Cueshot application.
///
/// Component errors (`SessionError`, `UploadError`, `InferenceError`) convert
/// into this type so callers that cross layers can use a single `Result`.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CueshotError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected user input (e.g. a non-image upload)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A session transition whose precondition was not met
    #[error("Session error: {0}")]
    Session(String),

    /// Inference call failed; holds the user-facing message
    #[error("Inference error: {0}")]
    Inference(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CueshotError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a rejected-input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CueshotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CueshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CueshotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for CueshotError {
    fn from(err: SessionError) -> Self {
        Self::Session(err.to_string())
    }
}

impl From<UploadError> for CueshotError {
    fn from(err: UploadError) -> Self {
        tracing::debug!("Upload rejected: {}", err);
        Self::InvalidInput(err.warning().to_string())
    }
}

impl From<InferenceError> for CueshotError {
    fn from(err: InferenceError) -> Self {
        Self::Inference(err.user_message())
    }
}

/// A type alias for `Result<T, CueshotError>`.
pub type Result<T> = std::result::Result<T, CueshotError>;
