use anyhow::Context;
use rs_blog_gen_svc::app::{create_app, init_tracing};
use rs_blog_gen_svc::config::Config;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!("Blog generation service stopped: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    info!("Configuration loaded: {:?}", config);

    let bind_address = config.bind_address();
    let server_url = config.server_url();
    let app = create_app(config).context("failed to create app")?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", bind_address))?;
    info!("Listening on {} (POST /api/generate, GET /health)", server_url);

    axum::serve(listener, app).await.context("server error")?;
    info!("Server shutdown gracefully");
    Ok(())
}
