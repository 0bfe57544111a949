use std::sync::Arc;

use anyhow::{Context, Result};
use metaforge::config::Config;
use metaforge::fetch::PageFetcher;
use metaforge::generator::MetaGenerator;
use metaforge::{gemini, server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing_subscriber();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Server starting in {} mode", config.environment);
    tracing::info!(
        "API key configured: {}",
        if config.api_configured() { "Yes" } else { "No" }
    );

    let gemini = config
        .gemini_api_key
        .as_deref()
        .map(gemini::Client::with_api_key);
    if gemini.is_some() {
        tracing::info!(model = %config.gemini_model, "Gemini AI initialized successfully");
    } else {
        tracing::info!("Gemini AI not available, template fallback only");
    }

    let fetcher = PageFetcher::new().context("Failed to build the page fetcher")?;
    let generator = Arc::new(MetaGenerator::new(
        Arc::new(fetcher),
        gemini,
        config.gemini_model.clone(),
    ));

    let app = server::build_router(generator, config.environment.clone(), config.api_configured());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Server running on port {}", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
