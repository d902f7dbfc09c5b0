//! Tauri application wiring: plugins, command handlers and managed state.

use std::sync::Arc;
use tauri::{Emitter, Manager};
use tauri_plugin_store::StoreExt;
use tracing::{debug, info, warn};
use crate::commands::*;
use crate::core::{AppState, EditorConfig};
use crate::gateway::GeminiGateway;
use crate::utils::EditorError;

const SETTINGS_STORE: &str = "settings.json";
const SETTINGS_KEY: &str = "editor";

/// Builds and runs the desktop app. Blocks until the last window closes.
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            get_session,
            load_image,
            load_image_data,
            edit_image,
            apply_edit,
            undo_edit,
            reset_edits,
            new_image,
            list_presets,
            export_image,
        ])
        .setup(|app| {
            let config = load_config(app.handle())?;
            let gateway = GeminiGateway::new(config)?;

            // Push every transition to the webview, including the pending
            // state before the model answers.
            let app_handle = app.app_handle().clone();
            let state = AppState::new(Arc::new(gateway)).with_observer(move |snapshot| {
                if let Err(e) = app_handle.emit(SESSION_CHANGED_EVENT, snapshot) {
                    warn!("Failed to emit {}: {}", SESSION_CHANGED_EVENT, e);
                }
            });
            app.manage(state);
            debug!("✓ AppState initialized");

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}

/// Defaults, then the persisted settings store, then the environment.
/// Validation happens when the gateway is built.
fn load_config(app: &tauri::AppHandle) -> Result<EditorConfig, EditorError> {
    let stored = match app.store(SETTINGS_STORE) {
        Ok(store) => store.get(SETTINGS_KEY),
        Err(e) => {
            warn!("Settings store unavailable: {}", e);
            None
        }
    };

    let base = match stored {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| EditorError::config(format!("Invalid stored settings: {}", e)))?,
        None => EditorConfig::default(),
    };

    base.with_env()
}
