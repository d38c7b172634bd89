use super::view::SessionPhase;
use thiserror::Error;

/// A transition was requested in a phase that does not allow it.
///
/// The session is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `select_target` without an uploaded image.
    #[error("No image has been selected")]
    NoFile,

    /// A request for this session is already in flight.
    #[error("An analysis is already in progress")]
    AlreadyAnalyzing,

    /// The action is not a valid transition from the current phase.
    #[error("Cannot {action} while in phase {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },

    /// A response arrived for a request the session no longer waits on.
    #[error("Discarded stale analysis result (generation {received}, current {current})")]
    StaleResult { received: u64, current: u64 },
}

impl SessionError {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResult { .. })
    }
}
