//! DAIV.PRO server entry point.
//!
//! Loads configuration, sets up structured logging, and starts the Axum
//! HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use daiv_core::relay::{EnvSource, RelayConfig};

use daiv_server::config::ServerConfig;
use daiv_server::routes;
use daiv_server::state::AppState;
use daiv_server::webhook::ReqwestWebhookClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(validation = ?config.validation, "DAIV.PRO starting");

    // Webhook settings are read per request; this check only logs.
    match RelayConfig::resolve(&EnvSource) {
        Ok(_) => info!("webhook relay configured"),
        Err(e) => warn!(error = %e, "webhook relay not configured, submissions will fail"),
    }

    let state = Arc::new(AppState::new(
        Arc::new(EnvSource),
        Arc::new(ReqwestWebhookClient::new()),
        config.validation,
    ));

    let app = routes::app(state);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "DAIV.PRO server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("DAIV.PRO server stopped");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
