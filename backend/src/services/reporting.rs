//! Reporting service for dashboard summaries, report tables and CSV export

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    daily_series, low_stock_products, most_profitable_products, purchase_history,
    recent_transactions, BusinessMetrics, DailyTotals, Product, ProductMargin, Transaction,
    DASHBOARD_SERIES_DAYS, LOW_STOCK_THRESHOLD, REPORT_TABLE_LIMIT,
};

use crate::error::{AppError, AppResult};
use crate::services::LedgerService;

/// Everything the dashboard view shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub metrics: BusinessMetrics,
    pub daily_series: Vec<DailyTotals>,
    pub recent_transactions: Vec<Transaction>,
}

/// Report tables
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub most_profitable: Vec<ProductMargin>,
    pub low_stock: Vec<Product>,
    pub purchase_history: Vec<Transaction>,
}

/// Flat transaction row with a fixed column set
#[derive(Debug, Serialize)]
pub struct TransactionCsvRow<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub transaction_type: &'static str,
    pub amount: Decimal,
    pub category: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub supplier: &'a str,
}

impl<'a> From<&'a Transaction> for TransactionCsvRow<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            id: t.id.as_str(),
            transaction_type: t.transaction_type.as_str(),
            amount: t.amount,
            category: &t.category,
            description: &t.description,
            date: t.date,
            supplier: t.supplier.as_deref().unwrap_or_default(),
        }
    }
}

pub struct ReportingService<'a> {
    ledger: &'a LedgerService,
}

impl<'a> ReportingService<'a> {
    pub fn new(ledger: &'a LedgerService) -> Self {
        Self { ledger }
    }

    /// Metrics, the week ending `today`, and the newest transactions
    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        let transactions = self.ledger.transactions();
        DashboardSummary {
            metrics: self.ledger.metrics(),
            daily_series: daily_series(transactions, today, DASHBOARD_SERIES_DAYS),
            recent_transactions: recent_transactions(transactions, REPORT_TABLE_LIMIT).to_vec(),
        }
    }

    pub fn reports(&self) -> ReportSummary {
        let products = self.ledger.products();
        ReportSummary {
            most_profitable: most_profitable_products(products, REPORT_TABLE_LIMIT),
            low_stock: low_stock_products(products, LOW_STOCK_THRESHOLD)
                .into_iter()
                .cloned()
                .collect(),
            purchase_history: purchase_history(self.ledger.transactions(), REPORT_TABLE_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// The whole ledger as CSV, newest first
    pub fn transactions_csv(&self) -> AppResult<String> {
        let rows: Vec<TransactionCsvRow> = self
            .ledger
            .transactions()
            .iter()
            .map(TransactionCsvRow::from)
            .collect();
        Self::export_to_csv(&rows)
    }

    /// Export rows to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
