//! Receipt engine: HTTP access to the extraction service and effect execution.
mod client;
mod decode;
mod engine;
mod types;

pub use client::{ClientSettings, ExtractionClient, ReqwestClient};
pub use decode::{decode_json, is_json_content_type, DecodeError, Decoded};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    ClientError, EngineEvent, FailureKind, HistoryReply, ImagePayload, PaymentRecord, RequestId,
};
