//! Upload input: accepts a candidate image from a drop or a file picker.
//!
//! Validation happens here, before anything reaches the session. A rejected
//! file produces an [`UploadError`] carrying the warning to show; an accepted
//! file is handed back exactly once per user action.

use crate::image::ImageFile;
use thiserror::Error;

/// Advisory size guideline shown to users. Not enforced.
pub const RECOMMENDED_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Warning shown when a non-image file is offered.
pub const INVALID_FILE_TYPE_WARNING: &str = "Please upload an image file.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The declared content type is not in the `image/` category.
    #[error("Please upload an image file. ('{name}' is {mime_type})")]
    InvalidFileType { name: String, mime_type: String },

    /// The event carried no file at all.
    #[error("No file was provided")]
    NoFile,
}

impl UploadError {
    /// The inline warning presented to the user.
    pub fn warning(&self) -> &'static str {
        match self {
            UploadError::InvalidFileType { .. } => INVALID_FILE_TYPE_WARNING,
            UploadError::NoFile => "Please choose a file to upload.",
        }
    }
}

/// Upload widget state.
///
/// Only the drag flag lives here; it drives visual feedback and is never part
/// of the session.
#[derive(Debug, Default)]
pub struct UploadInput {
    dragging: bool,
}

impl UploadInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Handles a drop event. Only the first dropped file is considered.
    pub fn drop_files<I>(&mut self, files: I) -> Result<ImageFile, UploadError>
    where
        I: IntoIterator<Item = ImageFile>,
    {
        self.dragging = false;
        Self::accept_first(files)
    }

    /// Handles a file-picker change event. Only the first file is considered.
    pub fn pick_files<I>(&mut self, files: I) -> Result<ImageFile, UploadError>
    where
        I: IntoIterator<Item = ImageFile>,
    {
        Self::accept_first(files)
    }

    fn accept_first<I>(files: I) -> Result<ImageFile, UploadError>
    where
        I: IntoIterator<Item = ImageFile>,
    {
        let file = files.into_iter().next().ok_or(UploadError::NoFile)?;
        validate(&file)?;
        if file.len() > RECOMMENDED_MAX_BYTES {
            tracing::info!(
                file = file.name(),
                bytes = file.len(),
                "Image exceeds the recommended 10MB size"
            );
        }
        Ok(file)
    }
}

/// Checks that the declared type of `file` is an image type.
pub fn validate(file: &ImageFile) -> Result<(), UploadError> {
    if file.is_image() {
        return Ok(());
    }

    tracing::warn!(
        file = file.name(),
        mime_type = file.mime_type(),
        "Rejected non-image upload"
    );
    Err(UploadError::InvalidFileType {
        name: file.name().to_string(),
        mime_type: file.mime_type().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(name: &str) -> ImageFile {
        ImageFile::new(name, "image/jpeg", vec![1, 2, 3])
    }

    #[test]
    fn test_pick_accepts_image() {
        let mut input = UploadInput::new();
        let file = input.pick_files(vec![jpeg("table1.jpg")]).unwrap();
        assert_eq!(file.name(), "table1.jpg");
    }

    #[test]
    fn test_pick_rejects_text_file() {
        let mut input = UploadInput::new();
        let text = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());

        let err = input.pick_files(vec![text]).unwrap_err();
        assert_eq!(
            err,
            UploadError::InvalidFileType {
                name: "notes.txt".to_string(),
                mime_type: "text/plain".to_string(),
            }
        );
        assert_eq!(err.warning(), INVALID_FILE_TYPE_WARNING);
    }

    #[test]
    fn test_only_first_file_is_considered() {
        let mut input = UploadInput::new();
        let text = ImageFile::new("notes.txt", "text/plain", Vec::<u8>::new());

        // First file decides, even if a later one would be valid
        assert!(input.pick_files(vec![text, jpeg("b.jpg")]).is_err());
        let file = input.pick_files(vec![jpeg("a.jpg"), jpeg("b.jpg")]).unwrap();
        assert_eq!(file.name(), "a.jpg");
    }

    #[test]
    fn test_empty_event_yields_no_file() {
        let mut input = UploadInput::new();
        assert_eq!(input.pick_files(Vec::new()), Err(UploadError::NoFile));
    }

    #[test]
    fn test_drag_flag_lifecycle() {
        let mut input = UploadInput::new();
        assert!(!input.is_dragging());

        input.drag_over();
        assert!(input.is_dragging());
        input.drag_leave();
        assert!(!input.is_dragging());

        input.drag_over();
        let _ = input.drop_files(vec![jpeg("table.png")]);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_drop_clears_flag_even_when_rejected() {
        let mut input = UploadInput::new();
        input.drag_over();
        let pdf = ImageFile::new("rules.pdf", "application/pdf", Vec::<u8>::new());
        assert!(input.drop_files(vec![pdf]).is_err());
        assert!(!input.is_dragging());
    }
}
