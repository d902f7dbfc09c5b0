//! Self-describing image payloads (`data:<mime>;base64,<data>`).
//!
//! This is the form images take everywhere outside the gateway: the webview
//! renders it directly and the history stores it as-is.

use std::fmt;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::utils::{EditorError, EditorResult};

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Base64 image bytes together with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Wraps already-encoded base64 data, e.g. an inline image from the model.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encodes raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Parses a data URL. Only base64 data URLs are accepted.
    pub fn parse(data_url: &str) -> EditorResult<Self> {
        let rest = data_url
            .strip_prefix(DATA_PREFIX)
            .ok_or_else(|| EditorError::decode("Payload is not a data URL"))?;
        let (mime_type, data) = rest
            .split_once(BASE64_MARKER)
            .ok_or_else(|| EditorError::decode("Payload is not base64 encoded"))?;

        if mime_type.is_empty() {
            return Err(EditorError::decode("Payload has no MIME type"));
        }

        Ok(Self::new(mime_type, data))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 body with the `data:` prefix stripped, as sent on the wire.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn decode_bytes(&self) -> EditorResult<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| EditorError::decode(format!("Invalid base64 payload: {}", e)))
    }

    pub fn to_data_url(&self) -> String {
        format!("{}{}{}{}", DATA_PREFIX, self.mime_type, BASE64_MARKER, self.data)
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads run to megabytes; keep logs readable.
        write!(f, "{} ({} base64 chars)", self.mime_type, self.data.len())
    }
}

impl Serialize for EncodedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for EncodedImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
