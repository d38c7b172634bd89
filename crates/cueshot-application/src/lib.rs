//! Application layer: async orchestration of the shot session.

pub mod analysis_service;

pub use analysis_service::{AnalysisHandle, AnalysisService};
