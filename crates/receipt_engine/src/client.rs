use std::time::Duration;

use futures_util::StreamExt;
use receipt_logging::{receipt_debug, receipt_info, receipt_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{
    decode_json, ClientError, Decoded, FailureKind, HistoryReply, ImagePayload, PaymentRecord,
};

const JSON: &str = "application/json";
const IMAGE_FIELD: &str = "image";
/// Rejection bodies are read up to this size even when `max_response_bytes` is smaller.
const REJECTION_BODY_LIMIT: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Server root; `upload` and `history` are resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ExtractionClient: Send + Sync {
    /// `POST /upload` with the image as multipart field `image`.
    async fn upload(&self, image: &ImagePayload) -> Result<PaymentRecord, ClientError>;

    /// `GET /history`.
    async fn history(&self) -> Result<HistoryReply, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// A missing or `null` `payments` field both mean an empty history.
#[derive(Debug, Deserialize)]
struct HistoryBody {
    #[serde(default)]
    payments: Option<Vec<PaymentRecord>>,
}

struct RawResponse {
    status: reqwest::StatusCode,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, name: &str) -> Result<Url, ClientError> {
        self.base
            .join(name)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read(&self, request: reqwest::RequestBuilder) -> Result<RawResponse, ClientError> {
        let response = request
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if status.is_success() {
            let bytes = read_capped(response, self.settings.max_response_bytes).await?;
            return Ok(RawResponse {
                status,
                content_type,
                bytes,
            });
        }

        // A rejection is classified by its status even when the body is oversized.
        let limit = self.settings.max_response_bytes.max(REJECTION_BODY_LIMIT);
        match read_capped(response, limit).await {
            Ok(bytes) => Ok(RawResponse {
                status,
                content_type,
                bytes,
            }),
            Err(ClientError {
                kind: FailureKind::TooLarge { actual, .. },
                ..
            }) => {
                receipt_warn!(
                    "Dropping {} body of {:?} bytes (limit {})",
                    status,
                    actual,
                    limit
                );
                Ok(RawResponse {
                    status,
                    content_type: None,
                    bytes: Vec::new(),
                })
            }
            Err(err) => Err(err),
        }
    }
}

async fn read_capped(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, ClientError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(max_bytes, content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(max_bytes, next_len));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn too_large(max_bytes: u64, actual: u64) -> ClientError {
    ClientError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

#[async_trait::async_trait]
impl ExtractionClient for ReqwestClient {
    async fn upload(&self, image: &ImagePayload) -> Result<PaymentRecord, ClientError> {
        let url = self.endpoint("upload")?;
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(mime) = image.content_type.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        }
        let form = Form::new().part(IMAGE_FIELD, part);

        receipt_debug!(
            "POST {} file={} bytes={}",
            url,
            image.file_name,
            image.bytes.len()
        );
        let raw = self.read(self.client.post(url).multipart(form)).await?;
        if !raw.status.is_success() {
            return Err(rejection(&raw));
        }

        match decode_json::<PaymentRecord>(&raw.bytes, raw.content_type.as_deref()) {
            Ok(Decoded::Json(record)) => {
                receipt_info!(
                    "Upload extracted amount={} upi_id={}",
                    record.amount,
                    record.upi_id
                );
                Ok(record)
            }
            Ok(Decoded::NotJson { content_type }) => Err(ClientError::new(
                FailureKind::Malformed,
                format!(
                    "expected JSON, got {}",
                    content_type.as_deref().unwrap_or("no content type")
                ),
            )),
            Err(err) => Err(ClientError::new(FailureKind::Malformed, err.to_string())),
        }
    }

    async fn history(&self) -> Result<HistoryReply, ClientError> {
        let url = self.endpoint("history")?;
        receipt_debug!("GET {}", url);
        let raw = self.read(self.client.get(url)).await?;
        if !raw.status.is_success() {
            return Err(rejection(&raw));
        }

        match decode_json::<HistoryBody>(&raw.bytes, raw.content_type.as_deref()) {
            Ok(Decoded::Json(body)) => Ok(Decoded::Json(body.payments.unwrap_or_default())),
            Ok(Decoded::NotJson { content_type }) => {
                receipt_info!(
                    "History endpoint returned {:?} instead of JSON",
                    content_type
                );
                Ok(Decoded::NotJson { content_type })
            }
            Err(err) => Err(ClientError::new(FailureKind::Malformed, err.to_string())),
        }
    }
}

fn rejection(raw: &RawResponse) -> ClientError {
    let status = raw.status.as_u16();
    match decode_json::<ErrorBody>(&raw.bytes, raw.content_type.as_deref()) {
        Ok(Decoded::Json(body)) => ClientError::new(
            FailureKind::Rejected {
                status,
                message: body.error,
            },
            raw.status.to_string(),
        ),
        Ok(Decoded::NotJson { .. }) | Err(_) => {
            receipt_warn!("Server answered {} with an undecodable body", status);
            ClientError::new(FailureKind::RejectedOpaque { status }, raw.status.to_string())
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
