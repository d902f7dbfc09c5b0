//! Tauri command handlers for the edit session.

use std::path::PathBuf;
use tauri::{Manager, State};
use tracing::debug;
use crate::core::{AppState, SessionSnapshot};
use crate::instructions::{EditInstruction, PresetCatalog, catalog};
use crate::processing::default_export_name;
use crate::utils::{EditorError, EditorResult, ImageFormat};

/// Event carrying a [`SessionSnapshot`] after every state change.
pub const SESSION_CHANGED_EVENT: &str = "session-changed";

/// Returns the current session for the initial render.
#[tauri::command]
pub async fn get_session(state: State<'_, AppState>) -> EditorResult<SessionSnapshot> {
    Ok(state.snapshot().await)
}

/// Loads an image picked through the file dialog.
///
/// Unreadable files do not fail the command; the snapshot's `error` says so.
#[tauri::command]
pub async fn load_image(state: State<'_, AppState>, path: String) -> EditorResult<SessionSnapshot> {
    debug!("Received load_image command for {}", path);
    Ok(state.load_image_path(&path).await)
}

/// Loads an image dropped onto the webview, sent as raw bytes.
#[tauri::command]
pub async fn load_image_data(
    state: State<'_, AppState>,
    file_name: String,
    data: Vec<u8>,
) -> EditorResult<SessionSnapshot> {
    debug!("Received load_image_data command for {} ({} bytes)", file_name, data.len());
    Ok(state.load_image_bytes(file_name, data).await)
}

/// Submits a free-text instruction.
///
/// # Errors
/// [`EditorError::Busy`] while another edit is pending. Model failures are
/// reported through the snapshot, not as an error.
#[tauri::command]
pub async fn edit_image(state: State<'_, AppState>, prompt: String) -> EditorResult<SessionSnapshot> {
    state.apply_instruction(EditInstruction::FreeText { prompt }).await
}

/// Submits a structured instruction (preset, slider, localized edit, ...).
#[tauri::command]
pub async fn apply_edit(
    state: State<'_, AppState>,
    instruction: EditInstruction,
) -> EditorResult<SessionSnapshot> {
    debug!("Received apply_edit command: {:?}", instruction);
    state.apply_instruction(instruction).await
}

#[tauri::command]
pub async fn undo_edit(state: State<'_, AppState>) -> EditorResult<SessionSnapshot> {
    Ok(state.undo().await)
}

#[tauri::command]
pub async fn reset_edits(state: State<'_, AppState>) -> EditorResult<SessionSnapshot> {
    Ok(state.reset().await)
}

#[tauri::command]
pub async fn new_image(state: State<'_, AppState>) -> EditorResult<SessionSnapshot> {
    Ok(state.new_image().await)
}

#[tauri::command]
pub fn list_presets() -> PresetCatalog {
    catalog()
}

/// Saves the latest edit. Without an explicit path the file goes to the
/// user's download directory as `photophonia-edited.<ext>`.
#[tauri::command]
pub async fn export_image(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    format: ImageFormat,
    output_path: Option<String>,
) -> EditorResult<String> {
    let target = match output_path {
        Some(path) => PathBuf::from(path),
        None => app
            .path()
            .download_dir()
            .map_err(|e| EditorError::IO(format!("No download directory: {}", e)))?
            .join(default_export_name(format)),
    };

    let written = state.export_edited(format, target).await?;
    Ok(written.to_string_lossy().into_owned())
}
