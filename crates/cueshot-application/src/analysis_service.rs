//! Analysis service implementation.
//!
//! `AnalysisService` drives a [`ShotSession`] and the [`InferenceClient`]
//! together: transitions are applied under the session lock, the inference
//! call runs on the tokio runtime without the lock held, and its outcome is
//! settled back only if the session is still waiting for it.

use cueshot_core::inference::InferenceClient;
use cueshot_core::preview::PreviewProvider;
use cueshot_core::session::{SessionError, SessionPhase, ShotSession};
use cueshot_core::{CueshotError, ImageFile, Result, TargetGroup};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Outcome of a spawned analysis.
///
/// `None` means the session moved on (reset, or a newer upload) before the
/// response arrived, and the response was dropped.
pub type AnalysisHandle = JoinHandle<Option<SessionPhase>>;

pub struct AnalysisService {
    session: Arc<RwLock<ShotSession>>,
    client: Arc<dyn InferenceClient>,
}

impl AnalysisService {
    pub fn new(session: ShotSession, client: Arc<dyn InferenceClient>) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            client,
        }
    }

    /// Service over a fresh, empty session.
    pub fn with_preview_provider(
        preview_provider: Arc<dyn PreviewProvider>,
        client: Arc<dyn InferenceClient>,
    ) -> Self {
        Self::new(ShotSession::new(preview_provider), client)
    }

    /// Shared handle to the session, for presentation layers that render it.
    pub fn session(&self) -> Arc<RwLock<ShotSession>> {
        Arc::clone(&self.session)
    }

    /// Runs `f` against the current session under a read lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&ShotSession) -> R) -> R {
        let guard = self.session.read().await;
        f(&guard)
    }

    pub async fn phase(&self) -> SessionPhase {
        self.session.read().await.phase()
    }

    /// Hands an already validated upload to the session.
    pub async fn select_file(&self, file: ImageFile) -> std::result::Result<(), SessionError> {
        self.session.write().await.select_file(file)
    }

    /// Starts an analysis for `group` and returns immediately.
    ///
    /// The request runs in a spawned task; await the handle to learn how it
    /// settled. A client that cannot send at all (no credential) settles the
    /// session as failed before this returns, without spawning a request.
    pub async fn select_target(
        &self,
        group: TargetGroup,
    ) -> std::result::Result<AnalysisHandle, SessionError> {
        let ticket = {
            let mut guard = self.session.write().await;
            let ticket = guard.select_target(group)?;
            if let Err(err) = self.client.ensure_ready() {
                let phase = guard.settle(ticket.generation, Err(err))?;
                return Ok(tokio::spawn(async move { Some(phase) }));
            }
            ticket
        };

        let session = Arc::clone(&self.session);
        let client = Arc::clone(&self.client);
        let handle = tokio::spawn(async move {
            let outcome = client.analyze(&ticket.file, ticket.target).await;

            let mut guard = session.write().await;
            match guard.settle(ticket.generation, outcome) {
                Ok(phase) => Some(phase),
                Err(err) => {
                    tracing::debug!("Dropping analysis outcome: {}", err);
                    None
                }
            }
        });

        Ok(handle)
    }

    /// Starts an analysis and waits for it to settle.
    pub async fn analyze(&self, group: TargetGroup) -> Result<Option<SessionPhase>> {
        let handle = self.select_target(group).await?;
        handle
            .await
            .map_err(|e| CueshotError::internal(format!("Analysis task failed: {e}")))
    }

    pub async fn reset(&self) {
        self.session.write().await.reset();
    }

    pub async fn dismiss_error(&self) -> std::result::Result<(), SessionError> {
        self.session.write().await.dismiss_error()
    }
}
