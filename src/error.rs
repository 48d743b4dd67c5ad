use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

/// Custom error type for the application
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    ValidationError(String),
    MethodNotAllowed,
    /// Server-side setup is incomplete, e.g. the provider credential is missing
    Configuration(String),
    /// The completion provider failed or answered with an unusable payload
    Upstream {
        status: StatusCode,
        message: String,
        raw: Option<Value>,
    },
    InternalServerError(String),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream { status, .. } => *status,
            AppError::Configuration(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, raw) = match self {
            AppError::BadRequest(msg) | AppError::ValidationError(msg) => (msg, None),
            AppError::MethodNotAllowed => ("Method not allowed".to_string(), None),
            AppError::Configuration(msg) => {
                error!("Configuration error: {}", msg);
                (msg, None)
            }
            AppError::Upstream {
                status,
                message,
                raw,
            } => {
                error!("Upstream error ({}): {}", status, message);
                (message, raw)
            }
            AppError::InternalServerError(msg) => {
                error!("Internal server error: {}", msg);
                (msg, None)
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            raw,
        });

        (status, body).into_response()
    }
}

/// Transport failures of the completion call
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(format!("Completion request failed: {}", err))
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;
