use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: topic, charLength, numParagraphs";

/// A validated request for the generate endpoint
///
/// Built from the decoded JSON body. Field names on the wire are camelCase:
/// `topic`, `charLength`, `numParagraphs` and the optional `additional`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub char_length: u32,
    pub num_paragraphs: u32,
    pub additional: Option<String>,
}

impl GenerationRequest {
    /// Extracts and validates the request fields from a decoded body.
    ///
    /// A required field that is absent, null, false, zero or blank counts as
    /// missing. A present count that is not a positive integer within `u32`
    /// is rejected with its own message.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let fields = ["topic", "charLength", "numParagraphs"].map(|name| body.get(name));
        if fields.into_iter().any(is_falsy) {
            return Err(AppError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let topic = body
            .get("topic")
            .and_then(Value::as_str)
            .map(str::trim)
            .ok_or_else(|| AppError::ValidationError("topic must be a string".to_string()))?;
        let char_length =
            positive_int(body.get("charLength")).ok_or_else(|| not_positive("charLength"))?;
        let num_paragraphs =
            positive_int(body.get("numParagraphs")).ok_or_else(|| not_positive("numParagraphs"))?;

        let additional = body
            .get("additional")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string);

        Ok(Self {
            topic: topic.to_string(),
            char_length,
            num_paragraphs,
            additional,
        })
    }
}

fn not_positive(field: &str) -> AppError {
    AppError::ValidationError(format!(
        "{} must be a positive integer no greater than {}",
        field,
        u32::MAX
    ))
}

fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

// Accepts JSON numbers and numeric strings
fn positive_int(value: Option<&Value>) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= u32::MAX as f64)
                .map(|f| f as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| *n > 0)
}

/// Response payload for the generate endpoint
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub output: String,
}

impl GenerateResponse {
    pub fn new(output: String) -> Self {
        Self { output }
    }
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}
