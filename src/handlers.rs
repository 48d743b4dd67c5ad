use crate::app::AppState;
use crate::body::read_json_body_lenient;
use crate::completion::{ChatCompletionRequest, validate_reply};
use crate::error::{AppError, AppResult};
use crate::models::{GenerateResponse, GenerationRequest, HealthResponse};
use crate::prompt::build_prompt;
use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode},
    response::Json as ResponseJson,
};
use tracing::{debug, info, warn};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// CORS preflight: 200 with an empty body
pub async fn preflight() -> StatusCode {
    debug!("Preflight request answered");
    StatusCode::OK
}

pub async fn method_not_allowed(method: Method) -> AppError {
    warn!("Rejected {} request to generate endpoint", method);
    AppError::MethodNotAllowed
}

/// Generate handler
/// Validates the request, asks the completion provider for a blog post once,
/// and returns the generated text under `output`
pub async fn generate_handler(
    State(state): State<AppState>,
    body: Body,
) -> AppResult<ResponseJson<GenerateResponse>> {
    let payload = read_json_body_lenient(body, state.config.max_body_bytes)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let request = GenerationRequest::from_json(&payload)
        .inspect_err(|e| warn!("Generate request rejected: {:?}", e))?;
    info!(
        "Generate endpoint called for topic '{}' ({} chars, {} paragraphs)",
        request.topic, request.char_length, request.num_paragraphs
    );

    let api_key = state.config.openai_api_key.as_deref().ok_or_else(|| {
        AppError::Configuration("OPENAI_API_KEY is not configured".to_string())
    })?;

    let prompt = build_prompt(&request, &state.style);
    let completion_request = ChatCompletionRequest::from_prompt(prompt, &state.config);

    let reply = state
        .provider
        .complete(api_key, &completion_request)
        .await?;

    let output = validate_reply(reply)?;

    info!("Successfully generated {} characters", output.chars().count());
    Ok(ResponseJson(GenerateResponse::new(output)))
}
