//! Turning uploaded file bytes into a session's original image.

use tracing::debug;
use crate::core::OriginalImage;
use crate::utils::{EditorError, EditorResult, EncodedImage, ImageFile, ImageFormat};

/// Identifies the upload's format from its bytes and wraps it as a payload.
///
/// The MIME type comes from the content, not the file extension.
pub fn prepare_upload(file: ImageFile) -> EditorResult<OriginalImage> {
    if file.bytes.is_empty() {
        return Err(EditorError::decode(format!("{} is empty", file.file_name)));
    }

    let format = ImageFormat::sniff(&file.bytes)?;
    debug!(
        "Prepared upload {} as {} ({} bytes)",
        file.file_name,
        format.mime_type(),
        file.bytes.len()
    );

    Ok(OriginalImage {
        payload: EncodedImage::from_bytes(format.mime_type(), &file.bytes),
        file_name: file.file_name,
    })
}
