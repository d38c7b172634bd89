//! Preview references for locally held images.
//!
//! A preview reference is a revocable handle (an object URL, a `data:` URL,
//! ...) through which the uploaded image is displayed without being sent
//! anywhere. `PreviewReference` revokes its handle on drop, so the session
//! releases each preview exactly once simply by replacing or clearing it.

use crate::image::ImageFile;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Creates and revokes display handles for image files.
pub trait PreviewProvider: Send + Sync {
    /// Creates a new handle for `file` and returns its URL.
    fn create(&self, file: &ImageFile) -> String;

    /// Releases a handle previously returned by [`PreviewProvider::create`].
    fn revoke(&self, url: &str);
}

/// Owned preview handle. Revoked through its provider when dropped.
pub struct PreviewReference {
    url: String,
    provider: Arc<dyn PreviewProvider>,
}

impl PreviewReference {
    pub fn create(provider: Arc<dyn PreviewProvider>, file: &ImageFile) -> Self {
        let url = provider.create(file);
        tracing::debug!(file = file.name(), "Created preview reference");
        Self { url, provider }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewReference {
    fn drop(&mut self) {
        self.provider.revoke(&self.url);
        tracing::debug!("Released preview reference");
    }
}

impl fmt::Debug for PreviewReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // data: URLs can be megabytes long
        let shown: String = self.url.chars().take(48).collect();
        f.debug_struct("PreviewReference")
            .field("url", &shown)
            .finish()
    }
}

/// Provider issuing opaque `blob:` style handles and tracking which are live.
///
/// Suits hosts that resolve the handle themselves, and tests that need to
/// observe releases.
#[derive(Default)]
pub struct ObjectUrlPreviewProvider {
    live: Mutex<HashSet<String>>,
    revoked: AtomicUsize,
}

impl ObjectUrlPreviewProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles created but not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live().len()
    }

    /// Total number of revocations observed.
    pub fn revoked_count(&self) -> usize {
        self.revoked.load(Ordering::SeqCst)
    }

    // Single insert/remove calls cannot leave the set half-updated.
    fn live(&self) -> MutexGuard<'_, HashSet<String>> {
        self.live.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Preview registry lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl PreviewProvider for ObjectUrlPreviewProvider {
    fn create(&self, _file: &ImageFile) -> String {
        let url = format!("blob:cueshot/{}", Uuid::new_v4());
        self.live().insert(url.clone());
        url
    }

    fn revoke(&self, url: &str) {
        if !self.live().remove(url) {
            tracing::warn!(url, "Revoked an unknown or already released preview");
        }
        self.revoked.fetch_add(1, Ordering::SeqCst);
    }
}
