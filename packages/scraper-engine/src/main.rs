// Main entry point for the scraper engine

use anyhow::{Context, Result};
use scraper_engine::{build_app, shutdown_signal, EngineConfig, EngineState, PageFetcher};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scraper_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env().context("Failed to load configuration")?;
    let fetcher = PageFetcher::from_config(&config).context("Failed to create HTTP client")?;
    let app = build_app(EngineState::new(fetcher));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Scraper engine listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Scraper engine stopped");
    Ok(())
}
