//! Gemini `generateContent` client for image editing.

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, warn};
use crate::core::EditorConfig;
use crate::gateway::types::{GenerateContentRequest, GenerateContentResponse, normalize_response};
use crate::gateway::{EditResult, ImageEditGateway};
use crate::utils::{EditorError, EditorResult, EncodedImage};

/// Generic failure reported to callers. The cause goes to the log only.
pub const GATEWAY_FAILURE: &str = "Failed to edit image with Gemini API.";

#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: Client,
    config: EditorConfig,
}

impl GeminiGateway {
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EditorError::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Gemini gateway ready (model: {})", config.model);
        Ok(Self { client, config })
    }

    async fn send(&self, image: &EncodedImage, instruction: &str) -> anyhow::Result<EditResult> {
        let body = GenerateContentRequest::edit(image, instruction);

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", self.config.api_key.as_str())
            .json(&body)
            .send()
            .await
            .context("request to Gemini failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Gemini returned {}: {}", status, detail);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Gemini response was not valid JSON")?;

        if let Some(reason) = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            debug!("Gemini finish reason: {}", reason);
        }

        Ok(normalize_response(parsed))
    }
}

#[async_trait]
impl ImageEditGateway for GeminiGateway {
    async fn edit_image(&self, image: &EncodedImage, instruction: &str) -> EditorResult<EditResult> {
        debug!("Sending edit to {} with image {}", self.config.model, image);

        match self.send(image, instruction).await {
            Ok(result) => {
                if result.image.is_none() {
                    warn!("Gemini returned no image (text: {:?})", result.text);
                }
                Ok(result)
            }
            Err(e) => {
                error!("Error calling Gemini API: {:#}", e);
                Err(EditorError::gateway(GATEWAY_FAILURE))
            }
        }
    }
}
