//! The concrete [`InferenceClient`].
//!
//! Shapes the request, hands it to a [`StructuredBackend`], parses the answer
//! into a [`ShotAnalysis`], and classifies failures. Causes are logged here;
//! callers only see [`InferenceError`].

use crate::backend::{BackendError, StructuredBackend, StructuredRequest};
use crate::gemini_api_backend::GeminiApiBackend;
use crate::prompt::build_instructions;
use crate::schema::response_schema;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use cueshot_core::config::InferenceConfig;
use cueshot_core::inference::{InferenceClient, InferenceError};
use cueshot_core::{ImageFile, ShotAnalysis, TargetGroup};
use std::sync::Arc;

pub struct ShotAnalysisClient {
    config: InferenceConfig,
    backend: Arc<dyn StructuredBackend>,
}

impl ShotAnalysisClient {
    pub fn new(config: InferenceConfig, backend: Arc<dyn StructuredBackend>) -> Self {
        Self { config, backend }
    }

    /// Client backed by the Gemini REST API, configured from `config`.
    pub fn gemini(config: InferenceConfig) -> Result<Self, BackendError> {
        let backend = GeminiApiBackend::from_config(&config)?;
        Ok(Self::new(config, Arc::new(backend)))
    }

    fn api_key(&self) -> Result<&str, InferenceError> {
        self.config.api_key().ok_or_else(|| {
            tracing::warn!("Analysis requested without an API credential");
            InferenceError::missing_credential()
        })
    }

    fn build_request(file: &ImageFile, target: TargetGroup) -> StructuredRequest {
        StructuredRequest {
            image_base64: BASE64_STANDARD.encode(file.bytes()),
            mime_type: file.mime_type().to_string(),
            instructions: build_instructions(target),
            response_schema: response_schema(),
        }
    }
}

/// Parses the model's JSON text. Blank or unparsable text counts as empty.
fn parse_analysis(text: &str) -> Result<ShotAnalysis, InferenceError> {
    if text.trim().is_empty() {
        tracing::error!("Analysis failed: response text was empty");
        return Err(InferenceError::EmptyResponse);
    }

    serde_json::from_str(text).map_err(|err| {
        tracing::error!("Analysis failed: unparsable response ({err})");
        tracing::debug!(body = text, "Unparsable analysis body");
        InferenceError::EmptyResponse
    })
}

#[async_trait]
impl InferenceClient for ShotAnalysisClient {
    fn ensure_ready(&self) -> Result<(), InferenceError> {
        self.api_key().map(|_| ())
    }

    async fn analyze(
        &self,
        file: &ImageFile,
        target: TargetGroup,
    ) -> Result<ShotAnalysis, InferenceError> {
        let api_key = self.api_key()?;

        let request = Self::build_request(file, target);
        tracing::info!(
            backend = self.backend.name(),
            model = self.config.model.as_str(),
            file = file.name(),
            target = target.as_str(),
            "Requesting shot analysis"
        );

        let text = match self.backend.generate(api_key, &request).await {
            Ok(text) => text,
            Err(BackendError::NoText) => {
                tracing::error!("Analysis failed: {}", BackendError::NoText);
                return Err(InferenceError::EmptyResponse);
            }
            Err(err) => {
                tracing::error!("Analysis failed: {err}");
                return Err(InferenceError::Failure(err.to_string()));
            }
        };

        let analysis = parse_analysis(&text)?;
        tracing::info!(
            shot = analysis.recommended_shot.as_str(),
            difficulty = analysis.difficulty.as_str(),
            confidence = analysis.confidence_score,
            "Analysis complete"
        );
        Ok(analysis)
    }
}
