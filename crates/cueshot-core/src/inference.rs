//! Inference client seam.
//!
//! The session layer only knows this trait; which hosted model answers the
//! request is decided by the implementation passed in at construction.

use crate::analysis::{ShotAnalysis, TargetGroup};
use crate::config::CREDENTIAL_ENV_VAR;
use crate::image::ImageFile;
use async_trait::async_trait;
use thiserror::Error;

/// The only message shown to users for failures other than a missing credential.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to analyze the pool table. Please ensure the image is clear and try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// No API credential was configured. Raised before any network activity.
    #[error(
        "API key is missing. Set the '{variable}' environment variable or add the key to secret.json."
    )]
    MissingCredential { variable: String },

    /// The service answered without a usable body.
    #[error("No data returned from the inference service")]
    EmptyResponse,

    /// Transport, service, or parsing failure. Holds the diagnostic cause.
    #[error("Inference request failed: {0}")]
    Failure(String),
}

impl InferenceError {
    pub fn missing_credential() -> Self {
        Self::MissingCredential {
            variable: CREDENTIAL_ENV_VAR.to_string(),
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }

    /// The message suitable for display.
    ///
    /// Missing-credential errors are shown verbatim since they tell the user
    /// how to fix the setup; everything else collapses to
    /// [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential { .. } => self.to_string(),
            Self::EmptyResponse | Self::Failure(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Produces a shot recommendation for a table image.
///
/// One attempt per call; implementations never retry internally.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Checks, without network activity, that a request could be sent.
    fn ensure_ready(&self) -> Result<(), InferenceError> {
        Ok(())
    }

    async fn analyze(
        &self,
        file: &ImageFile,
        target: TargetGroup,
    ) -> Result<ShotAnalysis, InferenceError>;
}
