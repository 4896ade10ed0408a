//! HTTP handlers for ledger transactions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{
    filter_transactions, is_known_category, normalize_transaction, validate_amount, validate_sale_quantity,
    NewTransaction, ProductId, Transaction, TransactionFilter, TransactionId, TransactionType,
};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Transaction data plus the optional product sold
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[serde(flatten)]
    pub transaction: NewTransaction,
    pub product_id: Option<ProductId>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub q: Option<String>,
}

/// List transactions, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<Vec<Transaction>>> {
    let transaction_type = query
        .transaction_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::parse::<TransactionType>)
        .transpose()
        .map_err(|e| AppError::field("type", &e.to_string()))?;

    let filter = TransactionFilter {
        transaction_type,
        query: query.q,
    };

    let ledger = state.ledger.read().await;
    let transactions = filter_transactions(ledger.transactions(), &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(transactions))
}

/// Record a transaction, decrementing stock when a sale names a product
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    validate_amount(request.transaction.amount).map_err(|_| AppError::Validation {
        field: "amount".to_string(),
        message: "Please enter a valid amount greater than 0.".to_string(),
        message_es: "Por favor ingrese un monto válido mayor a 0.".to_string(),
    })?;

    let data = normalize_transaction(request.transaction);
    if !is_known_category(data.transaction_type, &data.category) {
        tracing::warn!(
            kind = %data.transaction_type,
            category = %data.category,
            "Transaction uses a category outside the recommended list"
        );
    }
    let sale_item = match (data.transaction_type, request.product_id) {
        (TransactionType::Sale, Some(product_id)) => {
            Some((product_id, request.quantity.unwrap_or(1)))
        }
        _ => None,
    };

    // Stock check and decrement happen under the same write guard
    let mut ledger = state.ledger.write().await;

    if let Some((product_id, quantity)) = &sale_item {
        let product = ledger
            .product(product_id)
            .ok_or_else(|| AppError::NotFound(format!("Product {}", product_id)))?;

        if *quantity == 0 {
            return Err(AppError::field("quantity", "Quantity must be at least 1"));
        }
        validate_sale_quantity(*quantity, product.quantity).map_err(|e| {
            AppError::InsufficientInventory(format!(
                "{}: {} requested, {} in stock",
                e, quantity, product.quantity
            ))
        })?;
    }

    let transaction = match &sale_item {
        Some((product_id, quantity)) => {
            ledger
                .add_transaction(data, Some(product_id), Some(*quantity))
                .await
        }
        None => ledger.add_transaction(data, None, None).await,
    };

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Delete a transaction. Stock sold by it is not restored.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let id = TransactionId::from(id);
    let mut ledger = state.ledger.write().await;
    ledger
        .delete_transaction(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Transaction {}", id)))
}
