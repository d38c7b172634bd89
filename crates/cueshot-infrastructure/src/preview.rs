//! `data:` URL preview provider.
//!
//! Embeds the image bytes in the handle itself, so the preview can be written
//! into a standalone document (the SVG overlay) without referencing the
//! original file.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use cueshot_core::ImageFile;
use cueshot_core::preview::PreviewProvider;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct DataUrlPreviewProvider {
    live: AtomicUsize,
}

impl DataUrlPreviewProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of previews created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl PreviewProvider for DataUrlPreviewProvider {
    fn create(&self, file: &ImageFile) -> String {
        self.live.fetch_add(1, Ordering::SeqCst);
        format!(
            "data:{};base64,{}",
            file.mime_type(),
            BASE64_STANDARD.encode(file.bytes())
        )
    }

    fn revoke(&self, _url: &str) {
        // Nothing to free beyond the string itself
        let _ = self
            .live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}
