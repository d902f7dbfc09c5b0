//! Application state: the session plus the gateway it talks to.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::core::session::{
    RejectReason, SessionAction, SessionEffect, SessionSnapshot, SessionState, reduce,
};
use crate::gateway::ImageEditGateway;
use crate::instructions::EditInstruction;
use crate::processing::{encode_for_export, prepare_upload};
use crate::utils::{
    EditorError, EditorResult, ImageFile, ImageFormat, read_image_file, write_output_file,
};

type Observer = Box<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// Owns the edit session and carries out the effects its reducer asks for.
///
/// The session lock is never held across the gateway call, so the UI can
/// read snapshots (and undo) while an edit is in flight.
pub struct AppState {
    session: Mutex<SessionState>,
    gateway: Arc<dyn ImageEditGateway>,
    observer: Option<Observer>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ImageEditGateway>) -> Self {
        Self {
            session: Mutex::new(SessionState::default()),
            gateway,
            observer: None,
        }
    }

    /// Registers a callback run with a fresh snapshot after every change.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&*self.session.lock().await)
    }

    /// Loads an image from disk. Read or decode failures end up in the
    /// session status, not in the return value.
    pub async fn load_image_path(&self, path: impl AsRef<Path>) -> SessionSnapshot {
        let path = path.as_ref();
        match read_image_file(path).await {
            Ok(file) => self.load_image_file(file).await,
            Err(e) => {
                warn!("Failed to read image {}: {}", path.display(), e);
                self.dispatch(SessionAction::ImageLoadFailed).await.1
            }
        }
    }

    /// Loads an image the frontend already holds in memory.
    pub async fn load_image_bytes(&self, file_name: String, bytes: Vec<u8>) -> SessionSnapshot {
        self.load_image_file(ImageFile { file_name, bytes }).await
    }

    async fn load_image_file(&self, file: ImageFile) -> SessionSnapshot {
        let file_name = file.file_name.clone();
        let action = match prepare_upload(file) {
            Ok(original) => {
                info!("Loaded image {}", file_name);
                SessionAction::ImageLoaded(original)
            }
            Err(e) => {
                warn!("Failed to decode image {}: {}", file_name, e);
                SessionAction::ImageLoadFailed
            }
        };
        self.dispatch(action).await.1
    }

    /// Submits an instruction verbatim and waits for the model.
    ///
    /// Returns [`EditorError::Busy`] if another edit is still pending. Every
    /// other outcome is reported through the snapshot's status.
    pub async fn submit_edit(&self, instruction: String) -> EditorResult<SessionSnapshot> {
        let (effects, mut snapshot) = self.dispatch(SessionAction::SubmitEdit(instruction)).await;

        for effect in effects {
            match effect {
                SessionEffect::CallGateway(request) => {
                    debug!("Edit {:?} sent: {:?}", request.token, request.instruction);
                    let outcome = self
                        .gateway
                        .edit_image(&request.image, &request.instruction)
                        .await;
                    let (settled, settled_snapshot) = self
                        .dispatch(SessionAction::EditSettled {
                            token: request.token,
                            outcome,
                        })
                        .await;
                    if settled.iter().any(|e| matches!(e, SessionEffect::Discarded(_))) {
                        debug!("Edit {:?} settled after the session moved on; dropped", request.token);
                    }
                    snapshot = settled_snapshot;
                }
                SessionEffect::Rejected(RejectReason::Busy) => {
                    debug!("Rejected edit while another is pending");
                    return Err(EditorError::Busy);
                }
                SessionEffect::Discarded(_) | SessionEffect::Changed => {}
            }
        }

        Ok(snapshot)
    }

    /// Builds the instruction text and submits it. Intentions that map to no
    /// edit (a blank prompt, a slider released at zero) leave the session as is.
    pub async fn apply_instruction(&self, instruction: EditInstruction) -> EditorResult<SessionSnapshot> {
        match instruction.to_prompt()? {
            Some(prompt) => self.submit_edit(prompt).await,
            None => {
                debug!("Instruction {:?} produced no edit", instruction);
                Ok(self.snapshot().await)
            }
        }
    }

    pub async fn undo(&self) -> SessionSnapshot {
        self.dispatch(SessionAction::Undo).await.1
    }

    pub async fn reset(&self) -> SessionSnapshot {
        self.dispatch(SessionAction::Reset).await.1
    }

    pub async fn new_image(&self) -> SessionSnapshot {
        self.dispatch(SessionAction::NewImage).await.1
    }

    /// Writes the latest edit to `output_path` in `format`.
    pub async fn export_edited(
        &self,
        format: ImageFormat,
        output_path: impl AsRef<Path>,
    ) -> EditorResult<PathBuf> {
        let current = self
            .session
            .lock()
            .await
            .current_edit()
            .cloned()
            .ok_or(EditorError::NothingToExport)?;

        let bytes = encode_for_export(&current, format)?;
        let output_path = output_path.as_ref();
        write_output_file(output_path, &bytes).await?;

        info!("Exported edit to {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    async fn dispatch(&self, action: SessionAction) -> (Vec<SessionEffect>, SessionSnapshot) {
        let (effects, snapshot) = {
            let mut session = self.session.lock().await;
            let effects = reduce(&mut session, action);
            (effects, SessionSnapshot::from(&*session))
        };

        if effects.contains(&SessionEffect::Changed) {
            if let Some(observer) = &self.observer {
                observer(&snapshot);
            }
        }

        (effects, snapshot)
    }
}
