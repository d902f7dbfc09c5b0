use serde::{Deserialize, Serialize};
use crate::utils::EditorError;

/// Image formats the editor accepts on upload and offers on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
}

impl ImageFormat {
    /// MIME type used in data URLs and on the wire
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// The extension used for exported files. Matches the MIME subtype.
    pub fn export_extension(&self) -> &str {
        match self {
            Self::JPEG => "jpeg",
            Self::PNG => "png",
            Self::WebP => "webp",
        }
    }

    /// Identify the format from the file's magic bytes.
    pub fn sniff(bytes: &[u8]) -> Result<Self, EditorError> {
        let guessed = image::guess_format(bytes)
            .map_err(|e| EditorError::decode(format!("Unrecognized image data: {}", e)))?;
        Self::try_from(guessed)
    }

    /// Maps a payload's MIME type to a format the editor can decode.
    pub fn from_mime_type(mime: &str) -> Result<Self, EditorError> {
        match mime.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(Self::JPEG),
            "image/png" => Ok(Self::PNG),
            "image/webp" => Ok(Self::WebP),
            other => Err(EditorError::decode(format!(
                "Unsupported MIME type: {}", other
            ))),
        }
    }
}

impl TryFrom<image::ImageFormat> for ImageFormat {
    type Error = EditorError;

    fn try_from(format: image::ImageFormat) -> Result<Self, Self::Error> {
        match format {
            image::ImageFormat::Jpeg => Ok(Self::JPEG),
            image::ImageFormat::Png => Ok(Self::PNG),
            image::ImageFormat::WebP => Ok(Self::WebP),
            other => Err(EditorError::decode(format!(
                "Unsupported image format: {:?}", other
            ))),
        }
    }
}
