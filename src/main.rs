//! Funds Transfer Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Pick a notifier (webhook if `WEBHOOK_URL` is set, log otherwise)
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use std::{sync::Arc, time::Duration};

use funds_transfer_server::{
    app::{self, AppState},
    config::Config,
    services::notification_service::{LoggingNotifier, Notifier, WebhookNotifier},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let notifier: Arc<dyn Notifier> = match config.webhook_url.clone() {
        Some(url) => {
            if config.webhook_secret.is_empty() {
                anyhow::bail!("WEBHOOK_SECRET must be set when WEBHOOK_URL is configured");
            }
            let (notifier, _delivery) = WebhookNotifier::spawn(
                url.clone(),
                config.webhook_secret.clone(),
                Duration::from_secs(config.webhook_timeout_secs),
                config.webhook_queue_capacity,
            )?;
            tracing::info!("Webhook notifications enabled for {}", url);
            Arc::new(notifier)
        }
        None => {
            tracing::info!("No WEBHOOK_URL configured, notifications will be logged");
            Arc::new(LoggingNotifier)
        }
    };

    let app = app::router(AppState::new(notifier));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Handles requests concurrently on the multi-threaded tokio runtime
    axum::serve(listener, app).await?;

    Ok(())
}
