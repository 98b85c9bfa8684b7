use std::fmt;

use crate::ExtractionRecord;

/// Banner text when the server rejects an upload with a body we cannot show.
pub const GENERIC_REJECTION_MESSAGE: &str =
    "Server returned an error. Please check the image and try again.";
/// Banner text when the upload never got a usable answer from the server.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to extract details.";
/// Banner text for a JSON rejection that carries no `error` field.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

/// Identity of one issued network operation. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why an upload did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// Failure status with a JSON body; `message` is its `error` field.
    ServerRejected { message: Option<String> },
    /// Failure status with a body that is not JSON (e.g. an HTML error page).
    ServerRejectedOpaque { status: u16 },
    /// Connection refused, timeout, oversized body and similar.
    TransportFailure { reason: String },
    /// Success status, but the body is not a complete record.
    Undecodable { reason: String },
}

impl UploadFailure {
    /// Text for the error banner. Server markup and transport details are never shown.
    pub fn user_message(&self) -> String {
        match self {
            UploadFailure::ServerRejected { message: Some(message) } => message.clone(),
            UploadFailure::ServerRejected { message: None } => UPLOAD_FAILED_MESSAGE.to_string(),
            UploadFailure::ServerRejectedOpaque { .. } | UploadFailure::Undecodable { .. } => {
                GENERIC_REJECTION_MESSAGE.to_string()
            }
            UploadFailure::TransportFailure { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFailure::ServerRejected { message } => {
                write!(f, "server rejected upload: {}", message.as_deref().unwrap_or("-"))
            }
            UploadFailure::ServerRejectedOpaque { status } => {
                write!(f, "server rejected upload with status {status} and non-JSON body")
            }
            UploadFailure::TransportFailure { reason } => write!(f, "transport failure: {reason}"),
            UploadFailure::Undecodable { reason } => write!(f, "undecodable response: {reason}"),
        }
    }
}

pub type UploadOutcome = Result<ExtractionRecord, UploadFailure>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// The server returned the full list.
    Loaded(Vec<ExtractionRecord>),
    /// The endpoint answered with something other than JSON.
    Unavailable,
    /// Transport failure or error status.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Succeeded,
    Failed(UploadFailure),
}

/// The most recently issued upload and what became of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub token: RequestToken,
    pub file_name: String,
    pub status: RequestStatus,
}

impl ExtractionRequest {
    pub(crate) fn pending(token: RequestToken, file_name: impl Into<String>) -> Self {
        Self {
            token,
            file_name: file_name.into(),
            status: RequestStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
