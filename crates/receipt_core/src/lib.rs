//! Receipt scanner core: pure view-state machine and view-model helpers.
//!
//! All state lives in [`ViewState`] and is only changed through [`update`].
//! Network work is described by [`Effect`]s; their completions come back in
//! as [`Msg`]s carrying the [`RequestToken`] they were issued with.
mod effect;
mod history;
mod msg;
mod record;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use history::HistoryStore;
pub use msg::Msg;
pub use record::{ExtractionRecord, ImageUpload};
pub use request::{
    ExtractionRequest, HistoryOutcome, RequestStatus, RequestToken, UploadFailure, UploadOutcome,
    GENERIC_REJECTION_MESSAGE, TRANSPORT_FAILURE_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
pub use state::{NavTarget, View, ViewState};
pub use update::update;
pub use view_model::{AppViewModel, HistoryView, Screen, Tab};
