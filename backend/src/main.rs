//! NovaSphere bookkeeping server
//!
//! Serves the ledger, metrics, reports and insights to the dashboard.

use std::{net::SocketAddr, sync::Arc};

use novasphere_backend::{
    config::{Config, StorageBackend},
    create_app,
    external::GeminiClient,
    services::{InsightService, LedgerService},
    store::{FileStore, KeyValueStore, MemoryStore},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "nova_server=debug,novasphere_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting NovaSphere Bookkeeping Server");
    tracing::info!("Environment: {}", config.environment);

    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => {
            tracing::info!("Using file storage in {}", config.storage.data_dir);
            Arc::new(FileStore::open(&config.storage.data_dir)?)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let ledger = LedgerService::load(store).await;
    let insights = InsightService::new(Arc::new(GeminiClient::from_config(&config.insight)));

    if std::env::var(&config.insight.api_key_env).is_err() {
        tracing::warn!(
            "{} is not set; insight requests will fail until it is",
            config.insight.api_key_env
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_app(AppState::new(ledger, insights, config));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
