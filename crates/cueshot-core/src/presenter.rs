//! Result screen presentation state.
//!
//! Holds the widget-local flags of the result screen: overlay visibility and
//! the "was this helpful?" answer. Neither is session data; both are thrown
//! away when the screen is left.

use crate::analysis::{DifficultyTone, ShotAnalysis};
use crate::overlay::{OverlayRenderer, OverlayScene};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Up,
    Down,
}

/// Text blocks of the recommendation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub badge: String,
    pub tone: DifficultyTone,
    pub confidence: String,
    pub title: String,
    pub reasoning: String,
}

impl ResultSummary {
    pub fn from_analysis(analysis: &ShotAnalysis) -> Self {
        Self {
            badge: format!("{} Shot", analysis.difficulty),
            tone: analysis.difficulty.tone(),
            confidence: format!("Confidence: {}%", analysis.confidence_percent()),
            title: analysis.recommended_shot.clone(),
            reasoning: analysis.reasoning.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultPresenter {
    overlay: OverlayRenderer,
    feedback: Option<Feedback>,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    pub fn toggle_overlay(&mut self) -> bool {
        self.overlay.toggle()
    }

    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay.set_visible(visible);
    }

    /// Scene to draw on top of the image, honoring the visibility toggle.
    pub fn scene(&self, analysis: &ShotAnalysis) -> Option<OverlayScene> {
        self.overlay.scene(analysis)
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Records the user's rating. A later rating replaces an earlier one.
    pub fn submit_feedback(&mut self, feedback: Feedback) {
        tracing::info!(target: "feedback", ?feedback, "Feedback submitted");
        self.feedback = Some(feedback);
    }
}
