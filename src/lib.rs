// Module declarations in dependency order
pub mod utils;
pub mod instructions;
pub mod gateway;
pub mod core;
pub mod processing;
#[cfg(feature = "desktop")]
pub mod commands;
#[cfg(feature = "desktop")]
mod app;

// Public exports for external consumers
pub use crate::core::{AppState, EditorConfig, SessionSnapshot, SessionStatus};
pub use crate::gateway::{EditResult, GeminiGateway, ImageEditGateway};
pub use crate::instructions::EditInstruction;
pub use crate::utils::{EditorError, EditorResult, EncodedImage, ImageFormat};
#[cfg(feature = "desktop")]
pub use crate::app::run;
#[cfg(feature = "desktop")]
pub use crate::commands::SESSION_CHANGED_EVENT;

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
