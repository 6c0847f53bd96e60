// Initialize configuration
// Set up logging
// Create database connection pool
// Start snapshot polling until ctrl-c

use jetton_holder_service::{config::Config, db::connection, ingest::polling, state::AppState, tonapi::client::TonapiClient};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jetton-holder-service");

    let config = Config::from_env()?;
    info!("Tracking jetton {}", config.jetton_address);

    let db_pool = connection::establish_connection(&config.database_url).await?;
    info!("Database connection established");

    let client = TonapiClient::new(&config)?;
    let state = Arc::new(AppState { config, db_pool });

    let shutdown = CancellationToken::new();
    let polling_state = state.clone();
    let polling_shutdown = shutdown.clone();
    let polling_handle = tokio::spawn(async move {
        polling::start_polling(polling_state, client, polling_shutdown).await;
    });
    info!("Snapshot polling task started");

    tokio::signal::ctrl_c().await?;
    info!("ctrl-c received, shutting down");
    shutdown.cancel();
    polling_handle.await?;

    Ok(())
}
