use axum::body::{Body, to_bytes};
use serde_json::Value;
use tracing::warn;

/// Failure modes of [`read_json_body`]
#[derive(Debug)]
pub enum BodyError {
    /// The stream failed or exceeded the size limit
    Read(String),
    /// The bytes were read but are not valid JSON
    Malformed(serde_json::Error),
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyError::Read(msg) => write!(f, "Failed to read request body: {}", msg),
            BodyError::Malformed(e) => write!(f, "Request body is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for BodyError {}

/// Reads at most `limit` bytes from `body` and parses them as JSON
pub async fn read_json_body(body: Body, limit: usize) -> Result<Value, BodyError> {
    let bytes = to_bytes(body, limit)
        .await
        .map_err(|e| BodyError::Read(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(BodyError::Malformed)
}

/// Like [`read_json_body`], but a malformed or empty payload becomes `{}`.
///
/// Downstream validation then reports the missing fields.
pub async fn read_json_body_lenient(body: Body, limit: usize) -> Result<Value, BodyError> {
    match read_json_body(body, limit).await {
        Err(BodyError::Malformed(e)) => {
            warn!("Treating malformed request body as empty object: {}", e);
            Ok(Value::Object(Default::default()))
        }
        other => other,
    }
}
