/// Amount, UPI id and date extracted from one payment screenshot.
///
/// All fields are display strings; nothing here parses or validates them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionRecord {
    pub amount: String,
    pub upi_id: String,
    pub date: String,
}

impl ExtractionRecord {
    pub fn new(
        amount: impl Into<String>,
        upi_id: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            upi_id: upi_id.into(),
            date: date.into(),
        }
    }
}

/// Image selected by the user, ready to be sent as the `image` form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
