use receipt_logging::{receipt_debug, receipt_info, receipt_warn};

use crate::{Effect, HistoryOutcome, Msg, NavTarget, ViewState};

/// Pure update function: applies a message to state and returns any effects.
///
/// This is the only writer of [`ViewState`]. Completions are matched against
/// the latest issued token of their kind; anything older is dropped, so a slow
/// superseded request can never overwrite a newer result.
pub fn update(mut state: ViewState, msg: Msg) -> (ViewState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(target) => {
            state.navigate(target);
            if target == NavTarget::History {
                // Every visit re-reads the list; nothing is cached across visits.
                vec![Effect::FetchHistory {
                    token: state.start_history_fetch(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::UploadRequested(None) => Vec::new(),
        Msg::UploadRequested(Some(image)) => {
            let token = state.start_upload(&image);
            vec![Effect::SubmitUpload { token, image }]
        }
        Msg::RefreshHistory => vec![Effect::FetchHistory {
            token: state.start_history_fetch(),
        }],
        Msg::UploadCompleted { token, outcome } => {
            if let Err(failure) = &outcome {
                receipt_info!("Upload {} failed: {}", token, failure);
            }
            if !state.apply_upload(token, outcome) {
                receipt_debug!("Discarding stale upload completion {}", token);
            }
            Vec::new()
        }
        Msg::HistoryCompleted { token, outcome } => {
            match &outcome {
                HistoryOutcome::Loaded(records) => {
                    receipt_debug!("History {} returned {} records", token, records.len());
                }
                HistoryOutcome::Unavailable => {
                    receipt_info!(
                        "History {}: server does not return JSON history yet; keeping {} records",
                        token,
                        state.history().len()
                    );
                }
                HistoryOutcome::Failed { reason } => {
                    receipt_warn!("History {} failed: {}", token, reason);
                }
            }
            if !state.apply_history(token, outcome) {
                receipt_debug!("Discarding stale history completion {}", token);
            }
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.dismiss_error();
            Vec::new()
        }
    };

    (state, effects)
}
