//! Provider seam below [`crate::ShotAnalysisClient`].
//!
//! A backend sends one image plus instructions to a hosted model and returns
//! the raw text of its structured answer. Parsing and error classification
//! happen in the client, so backends stay thin.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Everything a backend needs for one structured generation call.
#[derive(Clone)]
pub struct StructuredRequest {
    pub image_base64: String,
    pub mime_type: String,
    pub instructions: String,
    pub response_schema: Value,
}

impl fmt::Debug for StructuredRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredRequest")
            .field("image_base64", &format_args!("<{} chars>", self.image_base64.len()))
            .field("mime_type", &self.mime_type)
            .field("instructions", &format_args!("<{} chars>", self.instructions.len()))
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status, with the decoded service message.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response envelope could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The envelope decoded but carried no text part.
    #[error("Response contained no text")]
    NoText,
}

#[async_trait]
pub trait StructuredBackend: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &str;

    async fn generate(
        &self,
        api_key: &str,
        request: &StructuredRequest,
    ) -> Result<String, BackendError>;
}
