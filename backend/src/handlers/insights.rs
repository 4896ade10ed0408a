//! Generative insight handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::insight::MAX_PROMPT_TRANSACTIONS;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    /// Markdown text
    pub insight: String,
}

/// Ask the text generator for advice on the current ledger
pub async fn request_insights(State(state): State<AppState>) -> AppResult<Json<InsightResponse>> {
    // Snapshot, then release the guard before the external call
    let (metrics, recent) = {
        let ledger = state.ledger.read().await;
        let transactions = ledger.transactions();
        let recent = transactions[..transactions.len().min(MAX_PROMPT_TRANSACTIONS)].to_vec();
        (ledger.metrics(), recent)
    };

    if metrics.transaction_count == 0 {
        return Err(AppError::Validation {
            field: "transactions".to_string(),
            message: "Please add some transactions first to allow for analysis.".to_string(),
            message_es:
                "Por favor agregue algunas transacciones primero para permitir el análisis."
                    .to_string(),
        });
    }

    let insight = state.insights.request_insight(&metrics, &recent).await?;
    Ok(Json(InsightResponse { insight }))
}
