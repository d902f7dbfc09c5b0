//! Tauri command handlers for the frontend.
//!
//! These are the intents the webview may invoke. Each returns the resulting
//! [`crate::core::SessionSnapshot`]; the same snapshot is also emitted as a
//! [`SESSION_CHANGED_EVENT`] so the UI sees the pending state while an edit
//! is in flight.

mod session;

pub use session::*;
