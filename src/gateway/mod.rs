//! The single outbound call to the generative image model.
//!
//! - [`ImageEditGateway`]: the seam the session service depends on
//! - [`GeminiGateway`]: the `generateContent` implementation
//! - [`EditResult`]: the normalized (image?, text?) answer

mod gemini;
mod types;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use crate::utils::{EditorResult, EncodedImage};

pub use gemini::{GATEWAY_FAILURE, GeminiGateway};
pub use types::{GenerateContentRequest, GenerateContentResponse, normalize_response};

/// What the model gave back. Either field may be missing, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResult {
    pub image: Option<EncodedImage>,
    pub text: Option<String>,
}

/// One best-effort round trip per call. No retries.
///
/// Implementations log the underlying failure and return a generic
/// [`crate::utils::EditorError::Gateway`].
#[async_trait]
pub trait ImageEditGateway: Send + Sync {
    async fn edit_image(&self, image: &EncodedImage, instruction: &str) -> EditorResult<EditResult>;
}
