use crate::app::AppState;
use crate::handlers::{generate_handler, health_check, method_not_allowed, preflight};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check)).route(
        "/api/generate",
        post(generate_handler)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}
