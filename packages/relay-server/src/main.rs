// Main entry point for the relay server

use anyhow::{Context, Result};
use relay_server::{build_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let port = config.port;
    tracing::info!(upstream = %config.upstream_url, "Configuration loaded");

    let app = build_app(AppState::new(config)?);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Claude proxy server listening on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", port);
    tracing::info!("Messages relay: http://localhost:{}/api/claude/messages", port);
    tracing::info!("Key check: http://localhost:{}/api/claude/test", port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
