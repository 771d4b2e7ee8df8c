//! ACME Settlement Service - HTTP API for merchant settlement calculation.
//!
//! This is the main entry point for the settlement service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use acme_settlement_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,acme_settlement=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ACME Settlement Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        acme_base_url = %config.acme.base_url,
        acme_timeout_seconds = config.acme.timeout_seconds,
        acme_max_attempts = config.acme.max_attempts,
        "Service configuration loaded"
    );

    // Build app state (shared upstream client + settlement pipeline)
    let state = AppState::new(config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
