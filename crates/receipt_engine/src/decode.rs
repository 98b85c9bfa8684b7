use serde::de::DeserializeOwned;

/// Result of looking at a response body before trusting its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// Declared as JSON and decoded into `T`.
    Json(T),
    /// Not declared as JSON (missing header, HTML error page, ...). Body ignored.
    NotJson { content_type: Option<String> },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("body declared as JSON does not match the expected structure: {message}")]
    Malformed { message: String },
}

/// `application/json`, ignoring parameters such as `charset` and letter case.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(media_type)
        .is_some_and(|mt| mt.eq_ignore_ascii_case("application/json"))
}

/// Decode `bytes` as `T` if and only if the response declared JSON.
pub fn decode_json<T: DeserializeOwned>(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<Decoded<T>, DecodeError> {
    if !is_json_content_type(content_type) {
        return Ok(Decoded::NotJson {
            content_type: content_type.map(ToOwned::to_owned),
        });
    }
    serde_json::from_slice(bytes)
        .map(Decoded::Json)
        .map_err(|err| DecodeError::Malformed {
            message: err.to_string(),
        })
}

fn media_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}
