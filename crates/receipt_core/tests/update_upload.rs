use std::sync::Once;

use pretty_assertions::assert_eq;
use receipt_core::{
    update, Effect, ExtractionRecord, ImageUpload, Msg, NavTarget, RequestStatus, RequestToken,
    UploadFailure, View, ViewState, GENERIC_REJECTION_MESSAGE, TRANSPORT_FAILURE_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(receipt_logging::initialize_for_tests);
}

fn image(name: &str) -> ImageUpload {
    ImageUpload::new(name, b"fake-png".to_vec()).with_content_type("image/png")
}

fn alice() -> ExtractionRecord {
    ExtractionRecord::new("250.00", "alice@bank", "2024-01-01")
}

fn submit(state: ViewState, name: &str) -> (ViewState, RequestToken) {
    let (state, effects) = update(state, Msg::UploadRequested(Some(image(name))));
    let token = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitUpload { token, .. } => Some(*token),
            _ => None,
        })
        .expect("submit effect");
    (state, token)
}

fn complete(
    state: ViewState,
    token: RequestToken,
    outcome: Result<ExtractionRecord, UploadFailure>,
) -> ViewState {
    let (state, effects) = update(state, Msg::UploadCompleted { token, outcome });
    assert!(effects.is_empty());
    state
}

#[test]
fn missing_file_changes_nothing() {
    init_logging();
    let (state, _) = update(ViewState::new(), Msg::RefreshHistory);
    let (state, token) = submit(state, "bad.png");
    let mut state = complete(
        state,
        token,
        Err(UploadFailure::ServerRejected {
            message: Some("blurry image".to_string()),
        }),
    );
    assert!(state.consume_dirty());
    assert!(state.loading());
    assert_eq!(state.error(), Some("blurry image"));

    let (mut next, effects) = update(state.clone(), Msg::UploadRequested(None));

    assert_eq!(next, state);
    assert!(effects.is_empty());
    assert!(next.loading());
    assert_eq!(next.error(), Some("blurry image"));
    assert!(!next.consume_dirty());
}

#[test]
fn upload_sets_loading_and_emits_effect_without_changing_view() {
    init_logging();
    let (state, effects) = update(ViewState::new(), Msg::UploadRequested(Some(image("a.png"))));

    assert_eq!(
        effects,
        vec![Effect::SubmitUpload {
            token: RequestToken::new(1),
            image: image("a.png"),
        }]
    );
    assert!(state.loading());
    assert_eq!(state.current_view(), View::Upload);
    assert_eq!(state.error(), None);
    let request = state.active_upload().expect("active upload");
    assert_eq!(request.file_name, "a.png");
    assert_eq!(request.status, RequestStatus::Pending);
}

#[test]
fn successful_upload_shows_result() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "receipt.png");
    let state = complete(state, token, Ok(alice()));

    assert_eq!(state.current_view(), View::Result);
    assert_eq!(state.current_result(), Some(&alice()));
    assert_eq!(state.error(), None);
    assert!(!state.loading());
    assert_eq!(
        state.active_upload().map(|r| r.status.clone()),
        Some(RequestStatus::Succeeded)
    );
}

#[test]
fn successful_upload_from_history_view_moves_to_result() {
    init_logging();
    let (state, _) = update(ViewState::new(), Msg::Navigate(NavTarget::History));
    let (state, token) = submit(state, "receipt.png");
    let state = complete(state, token, Ok(alice()));

    assert_eq!(state.current_view(), View::Result);
}

#[test]
fn json_rejection_surfaces_server_message() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "receipt.png");
    let state = complete(
        state,
        token,
        Err(UploadFailure::ServerRejected {
            message: Some("blurry image".to_string()),
        }),
    );

    assert_eq!(state.current_view(), View::Upload);
    assert_eq!(state.error(), Some("blurry image"));
    assert!(!state.loading());
    assert_eq!(state.current_result(), None);
}

#[test]
fn opaque_rejection_uses_generic_message() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "receipt.png");
    let state = complete(
        state,
        token,
        Err(UploadFailure::ServerRejectedOpaque { status: 500 }),
    );

    assert_eq!(state.error(), Some(GENERIC_REJECTION_MESSAGE));
    assert!(!state.error().unwrap().contains("<html"));
    assert!(!state.loading());
}

#[test]
fn transport_failure_uses_generic_message() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "receipt.png");
    let state = complete(
        state,
        token,
        Err(UploadFailure::TransportFailure {
            reason: "connection refused".to_string(),
        }),
    );

    assert_eq!(state.error(), Some(TRANSPORT_FAILURE_MESSAGE));
    assert_eq!(state.current_view(), View::Upload);
    assert!(!state.loading());
}

#[test]
fn new_upload_clears_previous_error() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "bad.png");
    let state = complete(
        state,
        token,
        Err(UploadFailure::ServerRejected { message: None }),
    );
    assert!(state.error().is_some());

    let (state, _) = submit(state, "good.png");
    assert_eq!(state.error(), None);
    assert!(state.loading());
}

#[test]
fn later_issued_upload_wins_when_resolved_first() {
    init_logging();
    let first = ExtractionRecord::new("10.00", "first@bank", "01/01/2024");
    let second = ExtractionRecord::new("20.00", "second@bank", "02/01/2024");

    let (state, token_a) = submit(ViewState::new(), "a.png");
    let (state, token_b) = submit(state, "b.png");
    assert!(token_b > token_a);

    let state = complete(state, token_b, Ok(second.clone()));
    assert!(!state.loading());
    let state = complete(state, token_a, Ok(first));

    assert_eq!(state.current_view(), View::Result);
    assert_eq!(state.current_result(), Some(&second));
    assert!(!state.loading());
}

#[test]
fn superseded_upload_does_not_release_loading() {
    init_logging();
    let (state, token_a) = submit(ViewState::new(), "a.png");
    let (state, token_b) = submit(state, "b.png");

    let state = complete(
        state,
        token_a,
        Err(UploadFailure::TransportFailure {
            reason: "timeout".to_string(),
        }),
    );
    assert!(state.loading());
    assert_eq!(state.error(), None);
    assert_eq!(state.current_view(), View::Upload);

    let state = complete(state, token_b, Ok(alice()));
    assert!(!state.loading());
    assert_eq!(state.current_result(), Some(&alice()));
}

#[test]
fn duplicate_completion_is_ignored() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "a.png");
    let mut state = complete(state, token, Ok(alice()));
    assert!(state.consume_dirty());

    let mut state = complete(
        state,
        token,
        Err(UploadFailure::ServerRejectedOpaque { status: 502 }),
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.error(), None);
    assert_eq!(state.current_result(), Some(&alice()));
}

#[test]
fn error_banner_can_be_dismissed() {
    init_logging();
    let (state, token) = submit(ViewState::new(), "a.png");
    let state = complete(
        state,
        token,
        Err(UploadFailure::ServerRejected {
            message: Some("blurry image".to_string()),
        }),
    );

    let (state, effects) = update(state, Msg::ErrorDismissed);
    assert_eq!(state.error(), None);
    assert_eq!(state.current_view(), View::Upload);
    assert!(effects.is_empty());
}
