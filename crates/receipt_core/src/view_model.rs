use crate::ExtractionRecord;

/// Navbar entry that is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Upload,
    History,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    Result(ExtractionRecord),
    History(HistoryView),
    /// Result view without a record; renders nothing.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    /// Shown as a "no history" placeholder rather than an empty list.
    Empty,
    /// Newest first.
    Entries(Vec<ExtractionRecord>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub active_tab: Tab,
    pub loading: bool,
    pub error_banner: Option<String>,
}
