//! Metrics, dashboard and reporting handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use shared::{BusinessMetrics, TransactionType};

use crate::error::{AppError, AppResult};
use crate::services::reporting::{DashboardSummary, ReportSummary, ReportingService};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub categories: Vec<&'static str>,
    pub default_category: &'static str,
}

pub async fn get_metrics(State(state): State<AppState>) -> Json<BusinessMetrics> {
    Json(state.ledger.read().await.metrics())
}

/// Category vocabulary for a transaction type
pub async fn get_categories(Path(kind): Path<String>) -> AppResult<Json<CategoriesResponse>> {
    let transaction_type: TransactionType = kind
        .parse()
        .map_err(|e: shared::UnknownTransactionType| AppError::field("type", &e.to_string()))?;

    Ok(Json(CategoriesResponse {
        transaction_type,
        categories: transaction_type.categories().to_vec(),
        default_category: transaction_type.default_category(),
    }))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let ledger = state.ledger.read().await;
    Json(ReportingService::new(&ledger).dashboard(Utc::now().date_naive()))
}

pub async fn get_reports(State(state): State<AppState>) -> Json<ReportSummary> {
    let ledger = state.ledger.read().await;
    Json(ReportingService::new(&ledger).reports())
}

/// Download the whole ledger as CSV
pub async fn export_transactions_csv(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let ledger = state.ledger.read().await;
    let csv = ReportingService::new(&ledger).transactions_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        csv,
    ))
}
