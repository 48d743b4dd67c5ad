pub mod openai;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::prompt::Prompt;

pub use openai::OpenAiClient;

pub const UPSTREAM_FAILURE_MESSAGE: &str = "OpenAI API call failed";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Invalid or empty response from OpenAI";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outbound chat-completions payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    pub fn from_prompt(prompt: Prompt, config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system),
                ChatMessage::user(prompt.user),
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Status and decoded body of one provider call, before validation.
///
/// A body that is not JSON is kept as a JSON string.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: StatusCode,
    pub body: Value,
}

/// A chat-completion backend
///
/// Implementations issue exactly one request per call and never retry.
/// Transport failures are returned as errors; any HTTP answer, successful or
/// not, is returned as a [`ProviderReply`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> anyhow::Result<ProviderReply>;
}

// -- typed response schema

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderErrorField {
    Detail { message: Option<String> },
    Text(String),
}

/// Why a provider reply could not be turned into generated text
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamError {
    Failed {
        status: StatusCode,
        message: String,
        raw: Value,
    },
    EmptyResponse {
        raw: Value,
    },
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Failed {
                status,
                message,
                raw,
            } => AppError::Upstream {
                status,
                message,
                raw: Some(raw),
            },
            UpstreamError::EmptyResponse { raw } => AppError::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: EMPTY_RESPONSE_MESSAGE.to_string(),
                raw: Some(raw),
            },
        }
    }
}

/// Validates a provider reply and extracts the trimmed text of the first choice
pub fn validate_reply(reply: ProviderReply) -> Result<String, UpstreamError> {
    let ProviderReply { status, body } = reply;

    if !status.is_success() {
        let message = provider_error_message(&body)
            .unwrap_or_else(|| UPSTREAM_FAILURE_MESSAGE.to_string());
        let status = if status.is_client_error() || status.is_server_error() {
            status
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        return Err(UpstreamError::Failed {
            status,
            message,
            raw: body,
        });
    }

    let content = ChatCompletionResponse::deserialize(&body)
        .ok()
        .and_then(|response| response.choices.into_iter().next())
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    content.ok_or(UpstreamError::EmptyResponse { raw: body })
}

fn provider_error_message(body: &Value) -> Option<String> {
    let parsed = ProviderErrorBody::deserialize(body).ok()?;
    let message = match parsed.error {
        ProviderErrorField::Detail { message } => message?,
        ProviderErrorField::Text(text) => text,
    };
    Some(message).filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(status: u16, body: Value) -> ProviderReply {
        ProviderReply {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn test_request_from_prompt() {
        let config = Config::default();
        let prompt = Prompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        };
        let request = ChatCompletionRequest::from_prompt(prompt, &config);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "usr" }
                ],
                "temperature": 0.7f32,
                "max_tokens": 2000
            })
        );
    }

    #[test]
    fn test_success_content_trimmed() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Linen defines summer...\n" } }]
        });
        assert_eq!(
            validate_reply(reply(200, body)).unwrap(),
            "Linen defines summer..."
        );
    }

    #[test]
    fn test_empty_or_missing_choices() {
        for body in [
            json!({ "choices": [] }),
            json!({ "id": "chatcmpl-1" }),
            json!({ "choices": [{ "message": { "content": "   " } }] }),
            json!({ "choices": [{ "finish_reason": "length" }] }),
            json!("not an object"),
        ] {
            let err = validate_reply(reply(200, body.clone())).unwrap_err();
            assert_eq!(err, UpstreamError::EmptyResponse { raw: body });
        }
    }

    #[test]
    fn test_failure_uses_provider_message() {
        let body = json!({ "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" } });
        let err = validate_reply(reply(401, body.clone())).unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Failed {
                status: StatusCode::UNAUTHORIZED,
                message: "Incorrect API key provided".to_string(),
                raw: body,
            }
        );
    }

    #[test]
    fn test_failure_string_error_field() {
        let err = validate_reply(reply(503, json!({ "error": "overloaded" }))).unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::Failed { status, message, .. }
                if status == StatusCode::SERVICE_UNAVAILABLE && message == "overloaded"
        ));
    }

    #[test]
    fn test_failure_without_message_falls_back() {
        let err = validate_reply(reply(500, json!("<html>bad gateway</html>"))).unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::Failed { message, .. } if message == UPSTREAM_FAILURE_MESSAGE
        ));
    }

    #[test]
    fn test_unexpected_non_error_status_becomes_500() {
        let err = validate_reply(reply(304, json!({}))).unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Failed {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: UPSTREAM_FAILURE_MESSAGE.to_string(),
                raw: json!({}),
            }
        );
    }

    #[test]
    fn test_empty_response_maps_to_500() {
        let app_err: AppError = UpstreamError::EmptyResponse { raw: json!({}) }.into();
        assert_eq!(app_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
