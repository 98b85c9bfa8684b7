use crate::view_model::{AppViewModel, HistoryView, Screen, Tab};
use crate::{
    ExtractionRecord, ExtractionRequest, HistoryOutcome, HistoryStore, ImageUpload, RequestStatus,
    RequestToken, UploadOutcome,
};

/// Mutually exclusive UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Upload,
    Result,
    History,
}

/// Views the user can navigate to directly. `Result` is only reached by a
/// successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Upload,
    History,
}

impl From<NavTarget> for View {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Upload => View::Upload,
            NavTarget::History => View::History,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    view: View,
    error: Option<String>,
    current_result: Option<ExtractionRecord>,
    history: HistoryStore,
    last_token: RequestToken,
    upload: Option<ExtractionRequest>,
    history_pending: Option<RequestToken>,
    dirty: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    /// True while the latest upload or the latest history fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.upload_pending() || self.history_pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_result(&self) -> Option<&ExtractionRecord> {
        self.current_result.as_ref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn active_upload(&self) -> Option<&ExtractionRequest> {
        self.upload.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match self.view {
            View::Upload => Screen::Upload,
            View::Result => match &self.current_result {
                Some(record) => Screen::Result(record.clone()),
                None => Screen::Blank,
            },
            View::History => {
                if self.history.is_empty() {
                    Screen::History(HistoryView::Empty)
                } else {
                    Screen::History(HistoryView::Entries(
                        self.history.newest_first().cloned().collect(),
                    ))
                }
            }
        };
        let active_tab = match self.view {
            View::Upload | View::Result => Tab::Upload,
            View::History => Tab::History,
        };

        AppViewModel {
            screen,
            active_tab,
            loading: self.loading(),
            error_banner: self.error.clone(),
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn upload_pending(&self) -> bool {
        self.upload
            .as_ref()
            .is_some_and(ExtractionRequest::is_pending)
    }

    fn allocate_token(&mut self) -> RequestToken {
        self.last_token = self.last_token.next();
        self.last_token
    }

    pub(crate) fn navigate(&mut self, target: NavTarget) {
        self.view = target.into();
        self.error = None;
        // A result is only kept while it is on screen.
        self.current_result = None;
        self.dirty = true;
    }

    pub(crate) fn start_upload(&mut self, image: &ImageUpload) -> RequestToken {
        let token = self.allocate_token();
        self.error = None;
        self.upload = Some(ExtractionRequest::pending(token, image.file_name.clone()));
        self.dirty = true;
        token
    }

    pub(crate) fn start_history_fetch(&mut self) -> RequestToken {
        let token = self.allocate_token();
        self.error = None;
        self.history_pending = Some(token);
        self.dirty = true;
        token
    }

    /// Applies an upload completion. Returns `false` (and changes nothing) when
    /// `token` is not the latest still-pending upload.
    pub(crate) fn apply_upload(&mut self, token: RequestToken, outcome: UploadOutcome) -> bool {
        let Some(request) = self.upload.as_mut() else {
            return false;
        };
        if request.token != token || !request.is_pending() {
            return false;
        }

        match outcome {
            Ok(record) => {
                request.status = RequestStatus::Succeeded;
                self.current_result = Some(record);
                self.view = View::Result;
                self.error = None;
            }
            Err(failure) => {
                self.error = Some(failure.user_message());
                request.status = RequestStatus::Failed(failure);
            }
        }
        self.dirty = true;
        true
    }

    /// Applies a history completion. Returns `false` (and changes nothing) when
    /// `token` is not the latest outstanding fetch.
    pub(crate) fn apply_history(&mut self, token: RequestToken, outcome: HistoryOutcome) -> bool {
        if self.history_pending != Some(token) {
            return false;
        }
        self.history_pending = None;
        if let HistoryOutcome::Loaded(records) = outcome {
            self.history.replace(records);
        }
        self.dirty = true;
        true
    }

    pub(crate) fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.dirty = true;
        }
    }
}
