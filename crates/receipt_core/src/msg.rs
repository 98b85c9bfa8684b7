use crate::{HistoryOutcome, ImageUpload, NavTarget, RequestToken, UploadOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a navbar entry or a "back"/"upload another" link.
    Navigate(NavTarget),
    /// User selected or dropped a file. `None` when nothing usable was picked.
    UploadRequested(Option<ImageUpload>),
    /// Re-read the history list without changing the view.
    RefreshHistory,
    /// Completion of an upload issued with `token`.
    UploadCompleted {
        token: RequestToken,
        outcome: UploadOutcome,
    },
    /// Completion of a history fetch issued with `token`.
    HistoryCompleted {
        token: RequestToken,
        outcome: HistoryOutcome,
    },
    /// User closed the error banner.
    ErrorDismissed,
}
