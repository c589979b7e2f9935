use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use weather_core::{Config, provider_from_config};

use crate::api::{AppState, router};

/// Run the HTTP server until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let provider = provider_from_config(&config)?;
    let state = AppState { provider: Arc::from(provider) };
    let app = router(state, &config.server.allowed_origins)?;

    let addr = (config.server.bind_address.as_str(), config.server.port);
    let listener = TcpListener::bind(addr).await.with_context(|| {
        format!("Failed to bind {}:{}", config.server.bind_address, config.server.port)
    })?;

    info!(address = %listener.local_addr()?, base_url = config.base_url(), "starting web server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
