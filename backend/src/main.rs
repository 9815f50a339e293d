//! Inventory & Finance Platform - Backend Server

use std::{net::SocketAddr, sync::Arc};

use inventory_finance_backend::{
    config::{Config, LoggingConfig, StorageBackend},
    create_app, AppState, InventoryStore, MemoryStore, PgStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "ifm_server=debug,inventory_finance_backend=debug,tower_http=debug,sqlx=warn".into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(logging.json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!logging.json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(&config.logging);

    tracing::info!("Starting Inventory & Finance Server");
    tracing::info!("Environment: {}", config.environment);

    let store: Arc<dyn InventoryStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Postgres => Arc::new(PgStore::connect(&config.database).await?),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Build application
    let app = create_app(AppState::new(store, config));

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
