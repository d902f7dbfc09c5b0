//! Editor configuration.
//!
//! Values are layered: built-in defaults, then the persisted settings store,
//! then environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::utils::{EditorError, EditorResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Key names checked in order for the API key.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "PHOTOPHONIA_MODEL";
pub const API_BASE_VAR: &str = "PHOTOPHONIA_API_BASE";
pub const TIMEOUT_VAR: &str = "PHOTOPHONIA_TIMEOUT_SECS";

/// Settings for talking to the image model.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    /// Per-request timeout in seconds. 0 disables it.
    pub request_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for EditorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "***" })
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl EditorConfig {
    /// Applies overrides from the process environment.
    pub fn with_env(self) -> EditorResult<Self> {
        self.with_vars(|name| std::env::var(name).ok())
    }

    /// Applies overrides from any variable source. Empty values are ignored.
    pub fn with_vars<F>(mut self, lookup: F) -> EditorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_VARS.iter().find_map(|name| get(*name)) {
            self.api_key = key;
        }
        if let Some(model) = get(MODEL_VAR) {
            self.model = model;
        }
        if let Some(base) = get(API_BASE_VAR) {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| {
                EditorError::config(format!("{} must be a number of seconds, got {:?}", TIMEOUT_VAR, raw))
            })?;
        }

        debug!("Resolved editor config: {:?}", self);
        Ok(self)
    }

    /// Checks that the config can be used to build a gateway.
    pub fn validate(&self) -> EditorResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(EditorError::config(format!(
                "API key not set. Export {} before starting the editor.",
                API_KEY_VARS[0]
            )));
        }
        if self.model.trim().is_empty() {
            return Err(EditorError::config("Model name cannot be empty"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_base, self.model)
    }
}
