use crate::ExtractionRecord;

/// Past extractions as last reported by the server, in the order received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryStore {
    records: Vec<ExtractionRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored order: oldest first, exactly as the server sent it.
    pub fn records(&self) -> &[ExtractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Display order: most recently received entry first. Never reorders storage.
    pub fn newest_first(&self) -> impl DoubleEndedIterator<Item = &ExtractionRecord> + '_ {
        self.records.iter().rev()
    }

    pub(crate) fn replace(&mut self, records: Vec<ExtractionRecord>) {
        self.records = records;
    }
}
