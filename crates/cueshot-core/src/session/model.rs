use super::error::SessionError;
use super::view::{AnalysisStatus, Screen, SessionPhase, View};
use crate::analysis::{ShotAnalysis, TargetGroup};
use crate::image::ImageFile;
use crate::inference::InferenceError;
use crate::preview::{PreviewProvider, PreviewReference};
use std::fmt;
use std::sync::Arc;

/// Describes the request to issue after a successful `select_target`.
///
/// The generation ties the eventual response to this exact request; a
/// response carrying an older generation is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub file: ImageFile,
    pub target: TargetGroup,
}

/// The single source of truth for what the user sees.
///
/// Fields only change through the transition methods below. Every call whose
/// precondition does not hold returns a [`SessionError`] and leaves the
/// session as it was.
pub struct ShotSession {
    file: Option<ImageFile>,
    preview: Option<PreviewReference>,
    target_group: Option<TargetGroup>,
    status: AnalysisStatus,
    result: Option<ShotAnalysis>,
    error_message: Option<String>,
    generation: u64,
    preview_provider: Arc<dyn PreviewProvider>,
}

impl ShotSession {
    /// Creates an empty session.
    pub fn new(preview_provider: Arc<dyn PreviewProvider>) -> Self {
        Self {
            file: None,
            preview: None,
            target_group: None,
            status: AnalysisStatus::Idle,
            result: None,
            error_message: None,
            generation: 0,
            preview_provider,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn file(&self) -> Option<&ImageFile> {
        self.file.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewReference::url)
    }

    pub fn target_group(&self) -> Option<TargetGroup> {
        self.target_group
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn result(&self) -> Option<&ShotAnalysis> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when every field is back at its initial value.
    ///
    /// The generation counter is not part of the user-visible tuple and keeps
    /// counting across resets.
    pub fn is_pristine(&self) -> bool {
        self.file.is_none()
            && self.preview.is_none()
            && self.target_group.is_none()
            && self.status == AnalysisStatus::Idle
            && self.result.is_none()
            && self.error_message.is_none()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.file.is_none() {
            return SessionPhase::Empty;
        }
        match self.status {
            AnalysisStatus::Idle => SessionPhase::AwaitingTarget,
            AnalysisStatus::Running => SessionPhase::Analyzing,
            AnalysisStatus::Succeeded => SessionPhase::Result,
            AnalysisStatus::Failed => SessionPhase::Failed,
        }
    }

    /// Derives the screen from the current fields.
    pub fn view(&self) -> View<'_> {
        let preview_url = self.preview_url().unwrap_or_default();
        let screen = match (self.phase(), self.target_group, self.result.as_ref()) {
            (SessionPhase::Empty, _, _) => Screen::Upload,
            (SessionPhase::Analyzing, Some(target), _) => Screen::Analyzing { target },
            (SessionPhase::Result, _, Some(analysis)) => Screen::Result {
                preview_url,
                analysis,
            },
            (SessionPhase::Failed, target, _) => Screen::Failed {
                preview_url,
                target,
            },
            (_, remembered, _) => Screen::TargetSelection {
                preview_url,
                remembered,
            },
        };

        View {
            screen,
            error_banner: self.error_message.as_deref(),
        }
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Stores a newly uploaded image and moves to target selection.
    ///
    /// The previous preview (if any) is released as it is replaced.
    pub fn select_file(&mut self, file: ImageFile) -> Result<(), SessionError> {
        if self.status == AnalysisStatus::Running {
            return Err(SessionError::InvalidTransition {
                action: "select a file",
                phase: self.phase(),
            });
        }

        let preview = PreviewReference::create(self.preview_provider.clone(), &file);
        tracing::info!(file = file.name(), mime_type = file.mime_type(), "Image selected");

        self.preview = Some(preview);
        self.file = Some(file);
        self.target_group = None;
        self.status = AnalysisStatus::Idle;
        self.result = None;
        self.error_message = None;
        self.generation += 1;
        Ok(())
    }

    /// Locks in the player's group and starts an analysis.
    ///
    /// Returns the ticket describing the request the caller must issue.
    pub fn select_target(&mut self, group: TargetGroup) -> Result<AnalysisTicket, SessionError> {
        let file = self.file.clone().ok_or(SessionError::NoFile)?;
        match self.phase() {
            SessionPhase::AwaitingTarget => {}
            SessionPhase::Analyzing => return Err(SessionError::AlreadyAnalyzing),
            phase => {
                return Err(SessionError::InvalidTransition {
                    action: "select a target group",
                    phase,
                });
            }
        }

        self.generation += 1;
        self.target_group = Some(group);
        self.status = AnalysisStatus::Running;
        self.error_message = None;
        tracing::info!(
            target_group = group.as_str(),
            generation = self.generation,
            "Analysis started"
        );

        Ok(AnalysisTicket {
            generation: self.generation,
            file,
            target: group,
        })
    }

    /// Records the outcome of the request issued for `generation`.
    ///
    /// Outcomes for any request other than the one currently running are
    /// rejected as [`SessionError::StaleResult`] and change nothing.
    pub fn settle(
        &mut self,
        generation: u64,
        outcome: Result<ShotAnalysis, InferenceError>,
    ) -> Result<SessionPhase, SessionError> {
        if self.status != AnalysisStatus::Running || generation != self.generation {
            return Err(SessionError::StaleResult {
                received: generation,
                current: self.generation,
            });
        }

        match outcome {
            Ok(analysis) => {
                tracing::info!(
                    shot = analysis.recommended_shot.as_str(),
                    difficulty = analysis.difficulty.as_str(),
                    "Analysis succeeded"
                );
                self.result = Some(analysis);
                self.status = AnalysisStatus::Succeeded;
            }
            Err(err) => {
                tracing::warn!("Analysis failed: {}", err);
                self.error_message = Some(err.user_message());
                self.status = AnalysisStatus::Failed;
            }
        }

        Ok(self.phase())
    }

    /// Returns to the initial empty session, releasing the preview.
    ///
    /// Valid from every phase. A request still in flight is not cancelled;
    /// its outcome will be stale when it arrives.
    pub fn reset(&mut self) {
        self.preview = None;
        self.file = None;
        self.target_group = None;
        self.status = AnalysisStatus::Idle;
        self.result = None;
        self.error_message = None;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "Session reset");
    }

    /// Clears the error message after a failed analysis.
    ///
    /// File and target group are kept, so the user lands back on target
    /// selection with the previous choice remembered.
    pub fn dismiss_error(&mut self) -> Result<(), SessionError> {
        if self.status != AnalysisStatus::Failed {
            return Err(SessionError::InvalidTransition {
                action: "dismiss an error",
                phase: self.phase(),
            });
        }

        self.error_message = None;
        self.status = AnalysisStatus::Idle;
        Ok(())
    }
}

impl fmt::Debug for ShotSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShotSession")
            .field("file", &self.file)
            .field("preview", &self.preview)
            .field("target_group", &self.target_group)
            .field("status", &self.status)
            .field("result", &self.result)
            .field("error_message", &self.error_message)
            .field("generation", &self.generation)
            .finish()
    }
}
