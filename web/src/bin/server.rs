//! LITReview API server.
//!
//! This binary:
//! - Connects to `PostgreSQL` and applies pending migrations
//! - Builds the Axum router with all endpoints
//! - Serves HTTP until interrupted
//!
//! # Usage
//!
//! ```bash
//! # Start infrastructure
//! docker compose up -d
//!
//! # Run server
//! cargo run --bin server
//! ```

use litreview_postgres::{connect_pool, run_migrations};
use litreview_web::{AppState, Config, build_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LITReview API server...");
    tracing::info!(postgres = %config.postgres.url, "Configuration loaded");

    let pool = connect_pool(&config.postgres.url, config.postgres.max_connections).await?;
    run_migrations(&pool).await?;
    tracing::info!("✓ Database ready");

    let session_ttl = chrono::Duration::seconds(config.auth.session_ttl);
    let state = AppState::new(pool, session_ttl);
    let router = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "LITReview API server is running");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
    }
}
