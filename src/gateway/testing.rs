//! Scripted gateway for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use async_trait::async_trait;
use tokio::sync::Notify;
use crate::gateway::{EditResult, ImageEditGateway};
use crate::utils::{EditorResult, EncodedImage};

/// Replays canned outcomes in order and records every call.
///
/// A gated gateway signals `started` on entry and then waits for `release`
/// before answering, so tests can act while a request is in flight.
pub struct FakeGateway {
    outcomes: Mutex<VecDeque<EditorResult<EditResult>>>,
    calls: Mutex<Vec<(EncodedImage, String)>>,
    gated: bool,
    pub started: Notify,
    pub release: Notify,
}

impl FakeGateway {
    pub fn new(outcomes: Vec<EditorResult<EditResult>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
            gated: false,
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn gated(outcomes: Vec<EditorResult<EditResult>>) -> Self {
        Self { gated: true, ..Self::new(outcomes) }
    }

    pub fn calls(&self) -> Vec<(EncodedImage, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEditGateway for FakeGateway {
    async fn edit_image(&self, image: &EncodedImage, instruction: &str) -> EditorResult<EditResult> {
        self.calls
            .lock()
            .unwrap()
            .push((image.clone(), instruction.to_string()));

        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(EditResult::default()))
    }
}
