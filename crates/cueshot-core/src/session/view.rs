//! Screen derivation.
//!
//! Which screen is shown is a pure function of the session fields; nothing
//! here stores state of its own.

use crate::analysis::{ShotAnalysis, TargetGroup};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No image yet.
    Empty,
    /// Image chosen, waiting for the player to pick a group.
    AwaitingTarget,
    /// Request in flight.
    Analyzing,
    /// Recommendation available.
    Result,
    /// The last request failed; the message is held in the session.
    Failed,
}

/// Progress of the analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// The screen to present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    /// Upload prompt.
    Upload,
    /// Group choice. `remembered` holds the group of a failed attempt whose
    /// error was dismissed.
    TargetSelection {
        preview_url: &'a str,
        remembered: Option<TargetGroup>,
    },
    /// Loading indicator.
    Analyzing { target: TargetGroup },
    /// Image with overlay and the recommendation panel.
    Result {
        preview_url: &'a str,
        analysis: &'a ShotAnalysis,
    },
    /// Failed attempt; offers dismissal or a fresh start.
    Failed {
        preview_url: &'a str,
        target: Option<TargetGroup>,
    },
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View<'a> {
    pub screen: Screen<'a>,
    /// Present exactly when the session holds an error message.
    pub error_banner: Option<&'a str>,
}

impl View<'_> {
    pub fn phase(&self) -> SessionPhase {
        match self.screen {
            Screen::Upload => SessionPhase::Empty,
            Screen::TargetSelection { .. } => SessionPhase::AwaitingTarget,
            Screen::Analyzing { .. } => SessionPhase::Analyzing,
            Screen::Result { .. } => SessionPhase::Result,
            Screen::Failed { .. } => SessionPhase::Failed,
        }
    }
}
