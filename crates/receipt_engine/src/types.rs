use std::fmt;

use serde::Deserialize;

use crate::Decoded;

pub type RequestId = u64;

/// Image bytes plus the metadata needed for the multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// `{ amount, upi_id, date }` as sent by the extraction service.
///
/// Every field is required; a body missing one fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRecord {
    pub amount: String,
    pub upi_id: String,
    pub date: String,
}

/// `Json(payments)` or `NotJson` when the endpoint does not speak JSON yet.
pub type HistoryReply = Decoded<Vec<PaymentRecord>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        request_id: RequestId,
        result: Result<PaymentRecord, ClientError>,
    },
    HistoryCompleted {
        request_id: RequestId,
        result: Result<HistoryReply, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// Error status with a JSON body; `message` is its `error` field if present.
    Rejected { status: u16, message: Option<String> },
    /// Error status with a non-JSON body.
    RejectedOpaque { status: u16 },
    /// Success status but the body is not the expected structure.
    Malformed,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl FailureKind {
    /// True when the server never produced a response we could read.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidUrl
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
                | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Rejected { status, message } => match message {
                Some(message) => write!(f, "rejected with status {status}: {message}"),
                None => write!(f, "rejected with status {status}"),
            },
            FailureKind::RejectedOpaque { status } => {
                write!(f, "rejected with status {status} (non-JSON body)")
            }
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
