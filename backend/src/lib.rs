//! NovaSphere bookkeeping backend
//!
//! Ledger, metrics, persistence and generative insights for a small
//! business dashboard, exposed as a JSON API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use services::{InsightService, LedgerService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Every mutation runs under the write guard, so a sale and its stock
    /// decrement are never interleaved with another request
    pub ledger: Arc<RwLock<LedgerService>>,
    pub insights: Arc<InsightService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(ledger: LedgerService, insights: InsightService, config: Config) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            insights: Arc::new(insights),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "NovaSphere Bookkeeping API v1"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
