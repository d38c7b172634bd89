//! Domain layer of Cueshot: shot analysis model, session state machine,
//! upload validation, and overlay geometry.
//!
//! Nothing in this crate performs I/O. The inference service is reached only
//! through the [`inference::InferenceClient`] trait, and preview handles
//! through [`preview::PreviewProvider`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod image;
pub mod inference;
pub mod overlay;
pub mod presenter;
pub mod preview;
pub mod session;
pub mod upload;

// Re-export common types
pub use analysis::{Coordinates, Difficulty, ShotAnalysis, TargetGroup};
pub use error::{CueshotError, Result};
pub use image::ImageFile;
