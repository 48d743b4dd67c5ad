use std::sync::Arc;

use axum::Router;
use axum::http::{
    HeaderValue,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    },
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::completion::{CompletionProvider, OpenAiClient};
use crate::config::Config;
use crate::prompt::StyleConfig;
use crate::routes::create_routes;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn CompletionProvider>,
    pub style: Arc<StyleConfig>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            style: Arc::new(StyleConfig::default()),
        }
    }
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rs_blog_gen_svc=info,tower_http=debug,axum::rejection=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the application backed by the OpenAI client described in `config`
pub fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let provider = OpenAiClient::new(config.openai_base_url.clone())?;
    if !config.has_api_key() {
        info!("OPENAI_API_KEY not set; generate requests will fail until it is configured");
    }

    Ok(build_router(AppState::new(config, Arc::new(provider))))
}

/// Attach routes and middleware to the given state.
///
/// The CORS headers are set on every response, preflight or not.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}
