//! Outbound side of Cueshot: instructions, response schema, and the hosted
//! model backends that answer them.

pub mod backend;
pub mod gemini_api_backend;
pub mod prompt;
pub mod schema;
pub mod shot_analysis_client;

pub use backend::{BackendError, StructuredBackend, StructuredRequest};
pub use gemini_api_backend::GeminiApiBackend;
pub use shot_analysis_client::ShotAnalysisClient;
