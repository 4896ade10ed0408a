//! Ledger service owning the transaction and product collections
//!
//! Every mutation is total: lookups that miss are no-ops reported through
//! `Option`, and inputs are trusted (validation happens at the HTTP
//! boundary). Each successful mutation writes the affected collection
//! through to the store.

use std::sync::Arc;

use shared::{
    compute_metrics, BusinessMetrics, NewTransaction, Product, ProductId, ProductInput,
    Transaction, TransactionId, TransactionType,
};

use crate::store::{self, KeyValueStore};

/// Single writer over the ledger collections
pub struct LedgerService {
    store: Arc<dyn KeyValueStore>,
    /// Newest first
    transactions: Vec<Transaction>,
    products: Vec<Product>,
}

impl LedgerService {
    /// Load both collections from the store, recovering from bad data
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let transactions = store::load_transactions(store.as_ref()).await;
        let products = store::load_products(store.as_ref()).await;

        tracing::info!(
            transactions = transactions.len(),
            products = products.len(),
            "Ledger loaded"
        );

        Self {
            store,
            transactions,
            products,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn metrics(&self) -> BusinessMetrics {
        compute_metrics(&self.transactions)
    }

    /// Record a transaction at the head of the ledger.
    ///
    /// For a SALE naming a product and a non-zero quantity, that product's
    /// stock is reduced by `quantity`, flooring at zero. An unknown product
    /// id leaves inventory untouched.
    pub async fn add_transaction(
        &mut self,
        data: NewTransaction,
        product_id: Option<&ProductId>,
        quantity: Option<u32>,
    ) -> Transaction {
        let transaction = data.into_transaction(TransactionId::generate());
        self.transactions.insert(0, transaction.clone());
        self.persist_transactions().await;

        if transaction.transaction_type == TransactionType::Sale {
            if let (Some(product_id), Some(quantity)) = (product_id, quantity.filter(|q| *q > 0)) {
                match self.products.iter_mut().find(|p| &p.id == product_id) {
                    Some(product) => {
                        product.decrement_stock(quantity);
                        tracing::info!(
                            product_id = %product.id,
                            sold = quantity,
                            remaining = product.quantity,
                            "Stock decremented"
                        );
                        self.persist_products().await;
                    }
                    None => {
                        tracing::debug!(product_id = %product_id, "Sale names unknown product");
                    }
                }
            }
        }

        tracing::info!(
            id = %transaction.id,
            kind = %transaction.transaction_type,
            amount = %transaction.amount,
            "Transaction recorded"
        );

        transaction
    }

    /// Remove a transaction. Inventory is not restored.
    pub async fn delete_transaction(&mut self, id: &TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| &t.id == id)?;
        let removed = self.transactions.remove(index);
        self.persist_transactions().await;
        tracing::info!(id = %id, "Transaction deleted");
        Some(removed)
    }

    /// Add a new product at the head of the catalogue
    pub async fn add_product(&mut self, input: ProductInput) -> Product {
        let product = Product::from_input(ProductId::generate(), input);
        self.products.insert(0, product.clone());
        self.persist_products().await;
        tracing::info!(id = %product.id, sku = %product.sku, "Product added");
        product
    }

    /// Replace every field of a product except its id
    pub async fn edit_product(&mut self, id: &ProductId, input: ProductInput) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| &p.id == id)?;
        product.replace(input);
        let updated = product.clone();
        self.persist_products().await;
        tracing::info!(id = %id, "Product updated");
        Some(updated)
    }

    pub async fn delete_product(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| &p.id == id)?;
        let removed = self.products.remove(index);
        self.persist_products().await;
        tracing::info!(id = %id, "Product deleted");
        Some(removed)
    }

    // Write failures are logged and absorbed; the in-memory state stays
    // authoritative for the rest of the session.
    async fn persist_transactions(&self) {
        if let Err(e) = store::save_transactions(self.store.as_ref(), &self.transactions).await {
            tracing::error!("Failed to persist transactions: {}", e);
        }
    }

    async fn persist_products(&self) {
        if let Err(e) = store::save_products(self.store.as_ref(), &self.products).await {
            tracing::error!("Failed to persist products: {}", e);
        }
    }
}
