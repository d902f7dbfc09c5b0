//! Edit session state and its reducer.
//!
//! [`reduce`] is the only way session state changes. It never performs I/O:
//! anything that must happen outside (calling the model, notifying the UI)
//! comes back as a [`SessionEffect`] for the caller to carry out.

use serde::Serialize;
use crate::gateway::EditResult;
use crate::utils::{EditorResult, EncodedImage};

pub const FILE_READ_FAILED: &str = "Failed to read the image file. Please try another one.";
pub const NO_IMAGE_LOADED: &str = "Please upload an image first.";
pub const NO_IMAGE_RETURNED: &str = "The AI did not return an image. It might not be able to fulfill this request. Please try a different prompt.";
pub const EDIT_FAILED: &str = "An error occurred while editing the image. Please check your API key and try again.";

/// The image the user loaded. Replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalImage {
    pub file_name: String,
    pub payload: EncodedImage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Pending,
    Error(String),
    Informational(String),
}

/// Identifies one accepted submission. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Everything the gateway needs for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub token: RequestToken,
    pub image: EncodedImage,
    pub instruction: String,
}

#[derive(Debug)]
pub enum SessionAction {
    ImageLoaded(OriginalImage),
    ImageLoadFailed,
    SubmitEdit(String),
    EditSettled {
        token: RequestToken,
        outcome: EditorResult<EditResult>,
    },
    Undo,
    Reset,
    NewImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A submission is already pending
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Send this request to the gateway and feed the result back as
    /// [`SessionAction::EditSettled`].
    CallGateway(EditRequest),
    Rejected(RejectReason),
    /// A settle arrived for a request that is no longer current.
    Discarded(RequestToken),
    /// Observable state changed.
    Changed,
}

/// One loaded image and its linear edit lineage.
///
/// Invariants: `history` is empty whenever `original` is `None`, and
/// `status` is `Pending` exactly when `in_flight` is set.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    original: Option<OriginalImage>,
    history: Vec<EncodedImage>,
    status: SessionStatus,
    model_text: Option<String>,
    in_flight: Option<RequestToken>,
    next_token: u64,
}

impl SessionState {
    pub fn original(&self) -> Option<&OriginalImage> {
        self.original.as_ref()
    }

    pub fn history(&self) -> &[EncodedImage] {
        &self.history
    }

    /// Latest edit result, if any.
    pub fn current_edit(&self) -> Option<&EncodedImage> {
        self.history.last()
    }

    /// What the next edit is applied to: the latest result, else the original.
    pub fn working_image(&self) -> Option<&EncodedImage> {
        self.current_edit()
            .or_else(|| self.original.as_ref().map(|o| &o.payload))
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Text the model sent along with its last answer.
    pub fn model_text(&self) -> Option<&str> {
        self.model_text.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_edits(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    fn clear_feedback(&mut self) {
        self.status = SessionStatus::Idle;
        self.model_text = None;
        self.in_flight = None;
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }
}

pub fn reduce(state: &mut SessionState, action: SessionAction) -> Vec<SessionEffect> {
    match action {
        SessionAction::ImageLoaded(original) => {
            state.clear_feedback();
            state.history.clear();
            state.original = Some(original);
            vec![SessionEffect::Changed]
        }
        SessionAction::ImageLoadFailed => {
            state.clear_feedback();
            state.history.clear();
            state.original = None;
            state.status = SessionStatus::Error(FILE_READ_FAILED.to_string());
            vec![SessionEffect::Changed]
        }
        SessionAction::SubmitEdit(instruction) => reduce_submit(state, instruction),
        SessionAction::EditSettled { token, outcome } => reduce_settled(state, token, outcome),
        SessionAction::Undo => {
            if state.history.pop().is_some() {
                vec![SessionEffect::Changed]
            } else {
                Vec::new()
            }
        }
        SessionAction::Reset => {
            state.clear_feedback();
            state.history.clear();
            vec![SessionEffect::Changed]
        }
        SessionAction::NewImage => {
            state.clear_feedback();
            state.history.clear();
            state.original = None;
            vec![SessionEffect::Changed]
        }
    }
}

fn reduce_submit(state: &mut SessionState, instruction: String) -> Vec<SessionEffect> {
    if state.is_pending() {
        return vec![SessionEffect::Rejected(RejectReason::Busy)];
    }

    let Some(image) = state.working_image().cloned() else {
        state.model_text = None;
        state.status = SessionStatus::Error(NO_IMAGE_LOADED.to_string());
        return vec![SessionEffect::Changed];
    };

    let token = state.issue_token();
    state.in_flight = Some(token);
    state.status = SessionStatus::Pending;
    state.model_text = None;

    vec![
        SessionEffect::Changed,
        SessionEffect::CallGateway(EditRequest {
            token,
            image,
            instruction,
        }),
    ]
}

fn reduce_settled(
    state: &mut SessionState,
    token: RequestToken,
    outcome: EditorResult<EditResult>,
) -> Vec<SessionEffect> {
    if state.in_flight != Some(token) {
        return vec![SessionEffect::Discarded(token)];
    }
    state.in_flight = None;

    match outcome {
        Ok(EditResult { image: Some(image), text }) => {
            state.history.push(image);
            state.status = match &text {
                Some(text) => SessionStatus::Informational(text.clone()),
                None => SessionStatus::Idle,
            };
            state.model_text = text;
        }
        Ok(EditResult { image: None, text }) => {
            state.status = SessionStatus::Informational(NO_IMAGE_RETURNED.to_string());
            state.model_text = text;
        }
        Err(_) => {
            state.status = SessionStatus::Error(EDIT_FAILED.to_string());
            state.model_text = None;
        }
    }

    vec![SessionEffect::Changed]
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub original_image: Option<EncodedImage>,
    pub original_file_name: Option<String>,
    pub edited_image: Option<EncodedImage>,
    pub history_len: usize,
    pub has_edits: bool,
    pub is_loading: bool,
    pub status: SessionStatus,
    pub error: Option<String>,
    pub info: Option<String>,
    pub response_text: Option<String>,
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        let (error, info) = match state.status() {
            SessionStatus::Error(msg) => (Some(msg.clone()), None),
            SessionStatus::Informational(msg) => (None, Some(msg.clone())),
            SessionStatus::Idle | SessionStatus::Pending => (None, None),
        };

        Self {
            original_image: state.original().map(|o| o.payload.clone()),
            original_file_name: state.original().map(|o| o.file_name.clone()),
            edited_image: state.current_edit().cloned(),
            history_len: state.history().len(),
            has_edits: state.has_edits(),
            is_loading: state.is_pending(),
            status: state.status().clone(),
            error,
            info,
            response_text: state.model_text().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::EditorError;
    use pretty_assertions::assert_eq;

    fn img(tag: &str) -> EncodedImage {
        EncodedImage::new("image/png", tag)
    }

    fn loaded(tag: &str) -> SessionState {
        let mut state = SessionState::default();
        reduce(
            &mut state,
            SessionAction::ImageLoaded(OriginalImage {
                file_name: format!("{tag}.png"),
                payload: img(tag),
            }),
        );
        state
    }

    fn submit(state: &mut SessionState, instruction: &str) -> EditRequest {
        let effects = reduce(state, SessionAction::SubmitEdit(instruction.to_string()));
        effects
            .into_iter()
            .find_map(|e| match e {
                SessionEffect::CallGateway(req) => Some(req),
                _ => None,
            })
            .expect("submission should call the gateway")
    }

    fn settle(state: &mut SessionState, token: RequestToken, outcome: EditorResult<EditResult>) -> Vec<SessionEffect> {
        reduce(state, SessionAction::EditSettled { token, outcome })
    }

    fn returns_image(tag: &str) -> EditorResult<EditResult> {
        Ok(EditResult { image: Some(img(tag)), text: None })
    }

    #[test]
    fn edit_undo_reset_walkthrough() {
        let mut state = loaded("A");

        let req = submit(&mut state, "make it brighter");
        assert_eq!(req.image, img("A"));
        assert_eq!(req.instruction, "make it brighter");
        settle(&mut state, req.token, returns_image("B"));
        assert_eq!(state.current_edit(), Some(&img("B")));
        assert_eq!(state.history(), &[img("B")]);

        let req = submit(&mut state, "add hat");
        assert_eq!(req.image, img("B"));
        settle(&mut state, req.token, returns_image("C"));
        assert_eq!(state.history(), &[img("B"), img("C")]);
        assert_eq!(state.current_edit(), Some(&img("C")));

        reduce(&mut state, SessionAction::Undo);
        assert_eq!(state.history(), &[img("B")]);
        assert_eq!(state.working_image(), Some(&img("B")));

        reduce(&mut state, SessionAction::Reset);
        assert!(state.history().is_empty());
        assert_eq!(state.working_image(), Some(&img("A")));
        assert_eq!(state.status(), &SessionStatus::Idle);
    }

    #[test]
    fn submit_without_image_never_calls_gateway() {
        let mut state = SessionState::default();
        let effects = reduce(&mut state, SessionAction::SubmitEdit("anything".into()));

        assert_eq!(effects, vec![SessionEffect::Changed]);
        assert_eq!(state.status(), &SessionStatus::Error(NO_IMAGE_LOADED.to_string()));
        assert!(!state.is_pending());
    }

    #[test]
    fn submit_goes_pending_and_clears_previous_messages() {
        let mut state = loaded("A");
        state.status = SessionStatus::Error("old".into());
        state.model_text = Some("old text".into());

        submit(&mut state, "x");
        assert_eq!(state.status(), &SessionStatus::Pending);
        assert_eq!(state.model_text(), None);
        assert!(state.is_pending());
    }

    #[test]
    fn text_only_result_leaves_history_alone() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(
            &mut state,
            req.token,
            Ok(EditResult { image: None, text: Some("cannot comply".into()) }),
        );

        assert!(state.history().is_empty());
        assert_eq!(
            state.status(),
            &SessionStatus::Informational(NO_IMAGE_RETURNED.to_string())
        );
        assert_eq!(state.model_text(), Some("cannot comply"));
        assert!(!state.is_pending());
    }

    #[test]
    fn image_with_text_records_both() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(
            &mut state,
            req.token,
            Ok(EditResult { image: Some(img("B")), text: Some("here you go".into()) }),
        );

        assert_eq!(state.history(), &[img("B")]);
        assert_eq!(state.status(), &SessionStatus::Informational("here you go".into()));
        assert_eq!(state.model_text(), Some("here you go"));
    }

    #[test]
    fn gateway_failure_sets_generic_error() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(&mut state, req.token, Err(EditorError::gateway("boom")));

        assert!(state.history().is_empty());
        assert_eq!(state.status(), &SessionStatus::Error(EDIT_FAILED.to_string()));
        assert!(!state.is_pending());
    }

    #[test]
    fn history_grows_only_for_image_results() {
        let mut state = loaded("A");
        let outcomes = vec![
            returns_image("1"),
            Ok(EditResult { image: None, text: Some("no".into()) }),
            Err(EditorError::gateway("down")),
            returns_image("2"),
            Ok(EditResult::default()),
        ];

        let mut expected = 0;
        for outcome in outcomes {
            let grows = matches!(outcome, Ok(EditResult { image: Some(_), .. }));
            let req = submit(&mut state, "x");
            settle(&mut state, req.token, outcome);
            if grows {
                expected += 1;
            }
            assert_eq!(state.history().len(), expected);
        }
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let mut state = loaded("A");
        let req = submit(&mut state, "first");

        let effects = reduce(&mut state, SessionAction::SubmitEdit("second".into()));
        assert_eq!(effects, vec![SessionEffect::Rejected(RejectReason::Busy)]);
        assert_eq!(state.in_flight(), Some(req.token));
        assert_eq!(state.status(), &SessionStatus::Pending);
    }

    #[test]
    fn stale_settle_after_reset_is_discarded() {
        let mut state = loaded("A");
        let stale = submit(&mut state, "first");
        reduce(&mut state, SessionAction::Reset);
        assert!(!state.is_pending());

        let fresh = submit(&mut state, "second");
        assert!(fresh.token > stale.token);

        let effects = settle(&mut state, stale.token, returns_image("STALE"));
        assert_eq!(effects, vec![SessionEffect::Discarded(stale.token)]);
        assert!(state.history().is_empty());
        assert!(state.is_pending());

        settle(&mut state, fresh.token, returns_image("FRESH"));
        assert_eq!(state.history(), &[img("FRESH")]);
    }

    #[test]
    fn settle_after_new_image_does_not_resurrect_history() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        reduce(&mut state, SessionAction::NewImage);

        settle(&mut state, req.token, returns_image("B"));
        assert!(state.original().is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn loading_while_pending_drops_the_late_result() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        reduce(
            &mut state,
            SessionAction::ImageLoaded(OriginalImage {
                file_name: "z.png".into(),
                payload: img("Z"),
            }),
        );
        assert!(!state.is_pending());

        let effects = settle(&mut state, req.token, returns_image("LATE"));
        assert_eq!(effects, vec![SessionEffect::Discarded(req.token)]);
        assert!(state.history().is_empty());
        assert_eq!(state.working_image(), Some(&img("Z")));
        assert_eq!(state.status(), &SessionStatus::Idle);
    }

    #[test]
    fn failed_load_while_pending_drops_the_late_result() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        reduce(&mut state, SessionAction::ImageLoadFailed);
        assert!(!state.is_pending());

        let effects = settle(&mut state, req.token, returns_image("LATE"));
        assert_eq!(effects, vec![SessionEffect::Discarded(req.token)]);
        assert!(state.original().is_none());
        assert!(state.history().is_empty());
        assert_eq!(state.status(), &SessionStatus::Error(FILE_READ_FAILED.to_string()));
    }

    #[test]
    fn undo_while_pending_lands_result_on_shortened_history() {
        let mut state = loaded("A");
        let first = submit(&mut state, "x");
        settle(&mut state, first.token, returns_image("B"));

        let second = submit(&mut state, "y");
        assert_eq!(second.image, img("B"));

        let effects = reduce(&mut state, SessionAction::Undo);
        assert_eq!(effects, vec![SessionEffect::Changed]);
        assert!(state.history().is_empty());
        assert!(state.is_pending());
        assert_eq!(state.status(), &SessionStatus::Pending);

        let effects = settle(&mut state, second.token, returns_image("C"));
        assert_eq!(effects, vec![SessionEffect::Changed]);
        assert_eq!(state.history(), &[img("C")]);
        assert_eq!(state.status(), &SessionStatus::Idle);
    }

    #[test]
    fn undo_on_empty_history_is_a_noop() {
        let mut state = loaded("A");
        state.status = SessionStatus::Informational("keep me".into());

        let effects = reduce(&mut state, SessionAction::Undo);
        assert!(effects.is_empty());
        assert_eq!(state.status(), &SessionStatus::Informational("keep me".into()));
    }

    #[test]
    fn undo_does_not_touch_status() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(
            &mut state,
            req.token,
            Ok(EditResult { image: Some(img("B")), text: Some("note".into()) }),
        );

        reduce(&mut state, SessionAction::Undo);
        assert!(state.history().is_empty());
        assert_eq!(state.status(), &SessionStatus::Informational("note".into()));
    }

    #[test]
    fn new_image_clears_everything() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(&mut state, req.token, returns_image("B"));
        submit(&mut state, "y");

        reduce(&mut state, SessionAction::NewImage);
        assert!(state.original().is_none());
        assert!(state.history().is_empty());
        assert_eq!(state.status(), &SessionStatus::Idle);
        assert!(!state.is_pending());
    }

    #[test]
    fn failed_load_unsets_original_and_history() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(&mut state, req.token, returns_image("B"));

        reduce(&mut state, SessionAction::ImageLoadFailed);
        assert!(state.original().is_none());
        assert!(state.history().is_empty());
        assert_eq!(state.status(), &SessionStatus::Error(FILE_READ_FAILED.to_string()));
    }

    #[test]
    fn loading_replaces_original_and_clears_lineage() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        settle(&mut state, req.token, returns_image("B"));

        reduce(
            &mut state,
            SessionAction::ImageLoaded(OriginalImage { file_name: "z.png".into(), payload: img("Z") }),
        );
        assert_eq!(state.working_image(), Some(&img("Z")));
        assert!(!state.has_edits());
    }

    #[test]
    fn snapshot_splits_status_into_error_and_info() {
        let mut state = loaded("A");
        let req = submit(&mut state, "x");
        let pending = SessionSnapshot::from(&state);
        assert!(pending.is_loading);
        assert_eq!(pending.error, None);

        settle(
            &mut state,
            req.token,
            Ok(EditResult { image: None, text: Some("cannot comply".into()) }),
        );
        let snap = SessionSnapshot::from(&state);
        assert!(!snap.is_loading);
        assert!(!snap.has_edits);
        assert_eq!(snap.info.as_deref(), Some(NO_IMAGE_RETURNED));
        assert_eq!(snap.response_text.as_deref(), Some("cannot comply"));
        assert_eq!(snap.original_file_name.as_deref(), Some("A.png"));

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["originalImage"], "data:image/png;base64,A");
        assert_eq!(json["status"]["state"], "informational");
        assert_eq!(json["editedImage"], serde_json::Value::Null);
    }
}
