//! Report derivations behind the dashboard and reports views
//!
//! All functions are pure over borrowed collections; callers take a snapshot
//! of the ledger and feed it in.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{sum_amounts, Product, Transaction, TransactionType};

/// Number of entries shown in the short report tables
pub const REPORT_TABLE_LIMIT: usize = 5;

/// Products with fewer units than this are flagged as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Days covered by the dashboard revenue/expense chart
pub const DASHBOARD_SERIES_DAYS: u32 = 7;

/// Longest daily series a caller may request
pub const MAX_SERIES_DAYS: u32 = 366;

/// A product together with its computed margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMargin {
    #[serde(flatten)]
    pub product: Product,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin: Decimal,
}

/// Revenue and expenses booked on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
}

/// Filter for transaction listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    /// Case-insensitive text matched against description, category and supplier
    pub query: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(transaction_type) = self.transaction_type {
            if transaction.transaction_type != transaction_type {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let needle = query.to_lowercase();
                let supplier = transaction.supplier.as_deref().unwrap_or_default();
                [transaction.description.as_str(), transaction.category.as_str(), supplier]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Transactions matching `filter`, in ledger order
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Products whose name or SKU contains `query`, ignoring case
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.sku.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products ranked by margin, best first. Unpriced products rank at 0%.
pub fn most_profitable_products(products: &[Product], limit: usize) -> Vec<ProductMargin> {
    let mut ranked: Vec<ProductMargin> = products
        .iter()
        .map(|p| ProductMargin {
            product: p.clone(),
            margin: p.margin().unwrap_or(Decimal::ZERO),
        })
        .collect();
    ranked.sort_by(|a, b| b.margin.cmp(&a.margin));
    ranked.truncate(limit);
    ranked
}

/// Products under `threshold` units, emptiest first
pub fn low_stock_products(products: &[Product], threshold: u32) -> Vec<&Product> {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.quantity < threshold).collect();
    low.sort_by_key(|p| p.quantity);
    low
}

/// Most recent expenses in ledger order
pub fn purchase_history(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .take(limit)
        .collect()
}

/// Head of the ledger
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    &transactions[..limit.min(transactions.len())]
}

/// Per-day totals for the `days` days ending at `end`, oldest first.
///
/// `days` is capped at [`MAX_SERIES_DAYS`]; days before the earliest
/// representable date are skipped.
pub fn daily_series(transactions: &[Transaction], end: NaiveDate, days: u32) -> Vec<DailyTotals> {
    (0..days.min(MAX_SERIES_DAYS))
        .rev()
        .filter_map(|offset| end.checked_sub_signed(Duration::days(i64::from(offset))))
        .map(|date| {
            let booked = |kind: TransactionType| -> Decimal {
                sum_amounts(
                    transactions
                        .iter()
                        .filter(|t| t.date == date && t.transaction_type == kind)
                        .map(|t| t.amount),
                )
            };
            DailyTotals {
                date,
                revenue: booked(TransactionType::Sale),
                expenses: booked(TransactionType::Expense),
            }
        })
        .collect()
}
