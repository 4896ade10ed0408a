//! Route definitions for the NovaSphere bookkeeping API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/transactions", transaction_routes())
        .nest("/products", product_routes())
        .route("/metrics", get(handlers::get_metrics))
        .route("/categories/:type", get(handlers::get_categories))
        .route("/dashboard", get(handlers::get_dashboard))
        .nest("/reports", report_routes())
        .route("/insights", post(handlers::request_insights))
}

/// Ledger transaction routes
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/:id", delete(handlers::delete_transaction))
}

/// Product catalogue routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_reports))
        .route("/transactions.csv", get(handlers::export_transactions_csv))
}
