//! Local key-value persistence for the ledger collections
//!
//! Two independent slots hold the transaction and product collections as
//! JSON arrays. Loading never fails: missing or corrupt data is replaced by
//! an empty ledger or the seed catalogue.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use shared::{seed_products, Product, Transaction};
use thiserror::Error;

/// Slot holding the transaction collection
pub const TRANSACTIONS_KEY: &str = "biz_transactions";

/// Slot holding the product collection
pub const PRODUCTS_KEY: &str = "biz_products";

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A string-keyed store of JSON documents
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Raw stored value, `None` if the slot was never written
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite a slot
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Load the transaction slot, defaulting to an empty ledger
pub async fn load_transactions(store: &dyn KeyValueStore) -> Vec<Transaction> {
    let raw = match store.get(TRANSACTIONS_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read stored transactions, starting empty: {}", e);
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!("Stored transactions are corrupt, starting empty: {}", e);
        Vec::new()
    })
}

/// Load the product slot.
///
/// Stored products are only trusted when the array is non-empty and its
/// first element carries a `costPrice` field; anything else (absent,
/// unparsable, empty, or an older shape) is replaced by the seed catalogue.
pub async fn load_products(store: &dyn KeyValueStore) -> Vec<Product> {
    let raw = match store.get(PRODUCTS_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return seed_products(),
        Err(e) => {
            tracing::warn!("Could not read stored products, using seed catalogue: {}", e);
            return seed_products();
        }
    };

    let parsed: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored products are corrupt, using seed catalogue: {}", e);
            return seed_products();
        }
    };

    if !has_current_shape(&parsed) {
        tracing::info!("Stored products are empty or outdated, using seed catalogue");
        return seed_products();
    }

    match serde_json::from_value(Value::Array(parsed)) {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Stored products failed to decode, using seed catalogue: {}", e);
            seed_products()
        }
    }
}

fn has_current_shape(parsed: &[Value]) -> bool {
    parsed
        .first()
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("costPrice"))
}

pub async fn save_transactions(
    store: &dyn KeyValueStore,
    transactions: &[Transaction],
) -> StoreResult<()> {
    let raw = serde_json::to_string(transactions)?;
    store.set(TRANSACTIONS_KEY, &raw).await
}

pub async fn save_products(store: &dyn KeyValueStore, products: &[Product]) -> StoreResult<()> {
    let raw = serde_json::to_string(products)?;
    store.set(PRODUCTS_KEY, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        assert!(load_transactions(&store).await.is_empty());
        assert_eq!(load_products(&store).await, seed_products());
    }

    #[tokio::test]
    async fn test_corrupt_transactions_load_empty() {
        let store = MemoryStore::new();
        store.set(TRANSACTIONS_KEY, "{not json").await.unwrap();
        assert!(load_transactions(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_product_shape_heuristic() {
        let store = MemoryStore::new();

        store.set(PRODUCTS_KEY, "[]").await.unwrap();
        assert_eq!(load_products(&store).await.len(), 5);

        // Older shape without costPrice
        store
            .set(
                PRODUCTS_KEY,
                r#"[{"id":"x","name":"Old","price":10,"quantity":1,"sku":"O-1"}]"#,
            )
            .await
            .unwrap();
        assert_eq!(load_products(&store).await, seed_products());

        store
            .set(
                PRODUCTS_KEY,
                r#"[{"id":"x","name":"New","price":10,"costPrice":4,"quantity":1,"sku":"N-1"}]"#,
            )
            .await
            .unwrap();
        let products = load_products(&store).await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "New");
    }

    #[tokio::test]
    async fn test_shape_ok_but_undecodable_falls_back_to_seeds() {
        let store = MemoryStore::new();
        store
            .set(PRODUCTS_KEY, r#"[{"costPrice":4,"quantity":-3}]"#)
            .await
            .unwrap();
        assert_eq!(load_products(&store).await, seed_products());
    }
}
