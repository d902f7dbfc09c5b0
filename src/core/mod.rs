//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Application state managed by Tauri
//! - [`SessionState`] and [`reduce`]: the edit session and its transitions
//! - [`SessionSnapshot`]: what the frontend renders
//! - [`EditorConfig`]: model and API settings

mod config;
mod session;
mod state;

pub use config::{DEFAULT_API_BASE, DEFAULT_MODEL, EditorConfig};
pub use session::{
    EDIT_FAILED, EditRequest, FILE_READ_FAILED, NO_IMAGE_LOADED, NO_IMAGE_RETURNED,
    OriginalImage, RejectReason, RequestToken, SessionAction, SessionEffect, SessionSnapshot,
    SessionState, SessionStatus, reduce,
};
pub use state::AppState;
