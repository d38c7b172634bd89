//! Reading table images from disk.

use cueshot_core::{CueshotError, ImageFile, Result};
use std::io::Cursor;
use std::path::Path;

/// Reads `path` into an [`ImageFile`].
///
/// The declared type is guessed from the extension, the way a browser fills
/// in `File.type`; unknown extensions become `application/octet-stream` and
/// are rejected later by upload validation.
pub fn load_image_file(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path)
        .map_err(|e| CueshotError::io(format!("Failed to read {}: {}", path.display(), e)))?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(
        file = name.as_str(),
        mime_type = mime_type.as_str(),
        bytes = bytes.len(),
        "Loaded image"
    );
    Ok(ImageFile::new(name, mime_type, bytes))
}

/// Pixel dimensions read from the image header, if the format is known.
pub fn image_dimensions(file: &ImageFile) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(file.bytes()))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok(dimensions) => Some(dimensions),
        Err(e) => {
            tracing::debug!("Could not read dimensions of {}: {}", file.name(), e);
            None
        }
    }
}
