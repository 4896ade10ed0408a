//! HTTP handlers

pub mod health;
pub mod insights;
pub mod products;
pub mod reports;
pub mod transactions;

pub use health::health_check;
pub use insights::request_insights;
pub use products::{create_product, delete_product, list_products, update_product};
pub use reports::{export_transactions_csv, get_categories, get_dashboard, get_metrics, get_reports};
pub use transactions::{create_transaction, delete_transaction, list_transactions};
