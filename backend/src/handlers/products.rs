//! HTTP handlers for the product catalogue

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{search_products, validate_product_input, Product, ProductId, ProductInput};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub q: Option<String>,
}

fn validated(input: ProductInput) -> AppResult<ProductInput> {
    validate_product_input(&input).map_err(|(field, message)| AppError::field(field, message))?;
    Ok(input)
}

/// List products, optionally filtered by name or SKU
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let ledger = state.ledger.read().await;
    let products = search_products(ledger.products(), query.q.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let input = validated(input)?;
    let product = state.ledger.write().await.add_product(input).await;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace every field of a product except its id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let input = validated(input)?;
    let id = ProductId::from(id);
    let mut ledger = state.ledger.write().await;
    ledger
        .edit_product(&id, input)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = ProductId::from(id);
    let mut ledger = state.ledger.write().await;
    ledger
        .delete_product(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))
}
