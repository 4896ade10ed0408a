//! WebAssembly module for the NovaSphere bookkeeping dashboard
//!
//! Provides client-side computation for:
//! - Business metrics from the transaction ledger
//! - Product margins
//! - Transaction form validation
//! - Category vocabularies and the dashboard's daily series

use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_transactions(transactions_json: &str) -> Result<Vec<Transaction>, String> {
    serde_json::from_str(transactions_json)
        .map_err(|e| format!("Invalid transactions JSON: {}", e))
}

fn metrics_json(transactions_json: &str) -> Result<String, String> {
    let transactions = parse_transactions(transactions_json)?;
    serde_json::to_string(&compute_metrics(&transactions)).map_err(|e| e.to_string())
}

fn daily_series_json(transactions_json: &str, end_date: &str, days: u32) -> Result<String, String> {
    let transactions = parse_transactions(transactions_json)?;
    let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {}: {}", end_date, e))?;
    serde_json::to_string(&shared::daily_series(&transactions, end, days))
        .map_err(|e| e.to_string())
}

fn recommended(transaction_type: &str, category: &str) -> Result<bool, String> {
    let transaction_type = transaction_type
        .parse::<TransactionType>()
        .map_err(|e| e.to_string())?;
    Ok(is_known_category(transaction_type, category.trim()))
}

fn category_list(transaction_type: &str) -> Result<&'static [&'static str], String> {
    transaction_type
        .parse::<TransactionType>()
        .map(|t| t.categories())
        .map_err(|e| e.to_string())
}

/// Compute business metrics from a JSON array of transactions
#[wasm_bindgen]
pub fn compute_business_metrics(transactions_json: &str) -> Result<String, JsValue> {
    metrics_json(transactions_json).map_err(to_js_error)
}

/// Revenue and expenses per day for the `days` days ending at `end_date`.
/// At most a year of days is returned.
#[wasm_bindgen]
pub fn compute_daily_series(
    transactions_json: &str,
    end_date: &str,
    days: u32,
) -> Result<String, JsValue> {
    daily_series_json(transactions_json, end_date, days).map_err(to_js_error)
}

/// Gross margin percentage, `undefined` for a product without a price
#[wasm_bindgen]
pub fn calculate_product_margin(price: f64, cost_price: f64) -> Option<f64> {
    let price = Decimal::from_f64(price)?;
    let cost_price = Decimal::from_f64(cost_price)?;
    product_margin(price, cost_price).and_then(|m| m.to_f64())
}

/// Whether an entered amount may be recorded
#[wasm_bindgen]
pub fn validate_transaction_amount(amount: f64) -> bool {
    Decimal::from_f64(amount)
        .map(|a| validate_amount(a).is_ok())
        .unwrap_or(false)
}

/// Error message for a sale quantity, `undefined` when it fits in stock
#[wasm_bindgen]
pub fn check_sale_quantity(requested: u32, in_stock: u32) -> Option<String> {
    validate_sale_quantity(requested, in_stock)
        .err()
        .map(str::to_string)
}

/// Whether `category` is on the recommended list for the transaction type.
/// Other categories are still accepted by the ledger.
#[wasm_bindgen]
pub fn is_recommended_category(transaction_type: &str, category: &str) -> Result<bool, JsValue> {
    recommended(transaction_type, category).map_err(to_js_error)
}

/// Recommended categories for `SALE` or `EXPENSE`
#[wasm_bindgen]
pub fn categories_for(transaction_type: &str) -> Result<js_sys::Array, JsValue> {
    let categories = category_list(transaction_type).map_err(to_js_error)?;
    Ok(categories.iter().map(|c| JsValue::from_str(c)).collect())
}
