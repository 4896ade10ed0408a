//! Ledger service tests
//!
//! Tests for the ledger engine including:
//! - Sales decrement stock, flooring at zero
//! - Deleting a transaction never restores stock
//! - Editing a product keeps its id and replaces everything else
//! - Every mutation is written through to the store

use std::str::FromStr;
use std::sync::Arc;

use novasphere_backend::services::LedgerService;
use novasphere_backend::store::{self, KeyValueStore, MemoryStore};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{NewTransaction, Product, ProductId, ProductInput, TransactionType};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product_input(price: &str, cost: &str, quantity: u32) -> ProductInput {
    ProductInput {
        name: "Desk Lamp".to_string(),
        price: dec(price),
        cost_price: dec(cost),
        quantity,
        sku: "DL-100".to_string(),
        description: None,
        supplier: None,
    }
}

/// Ledger over a store whose catalogue is a single product `p1`
async fn ledger_with_p1(
    price: &str,
    cost: &str,
    quantity: u32,
) -> (Arc<MemoryStore>, LedgerService) {
    let backing = Arc::new(MemoryStore::new());
    let p1 = Product::from_input(ProductId::from("p1"), product_input(price, cost, quantity));
    store::save_products(backing.as_ref(), &[p1]).await.unwrap();
    let ledger = LedgerService::load(backing.clone()).await;
    (backing, ledger)
}

fn sale(amount: &str) -> NewTransaction {
    NewTransaction::new(TransactionType::Sale, dec(amount))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// p1{price 100, cost 40, qty 10}, SALE 200 with p1 x2
    #[tokio::test]
    async fn test_sale_decrements_stock_and_books_revenue() {
        let (_, mut ledger) = ledger_with_p1("100", "40", 10).await;
        let p1 = ProductId::from("p1");

        ledger.add_transaction(sale("200"), Some(&p1), Some(2)).await;

        assert_eq!(ledger.product(&p1).unwrap().quantity, 8);
        assert_eq!(ledger.metrics().total_revenue, dec("200"));
        assert_eq!(ledger.metrics().transaction_count, 1);
    }

    #[tokio::test]
    async fn test_oversell_floors_at_zero() {
        let (_, mut ledger) = ledger_with_p1("10", "4", 3).await;
        let p1 = ProductId::from("p1");

        ledger.add_transaction(sale("50"), Some(&p1), Some(5)).await;

        assert_eq!(ledger.product(&p1).unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_sale_of_unknown_product_only_books_revenue() {
        let (_, mut ledger) = ledger_with_p1("10", "4", 3).await;

        ledger
            .add_transaction(sale("25"), Some(&ProductId::from("ghost")), Some(1))
            .await;

        assert_eq!(ledger.products()[0].quantity, 3);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_does_not_restore_stock() {
        let (_, mut ledger) = ledger_with_p1("100", "40", 10).await;
        let p1 = ProductId::from("p1");

        let recorded = ledger.add_transaction(sale("200"), Some(&p1), Some(2)).await;
        let removed = ledger.delete_transaction(&recorded.id).await.unwrap();

        assert_eq!(removed.id, recorded.id);
        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.product(&p1).unwrap().quantity, 8);
    }

    #[tokio::test]
    async fn test_edit_product_preserves_id() {
        let (_, mut ledger) = ledger_with_p1("100", "40", 10).await;
        let p1 = ProductId::from("p1");

        let mut input = product_input("120", "55", 4);
        input.name = "Desk Lamp Pro".to_string();
        input.supplier = Some("Lumen Co".to_string());
        let edited = ledger.edit_product(&p1, input.clone()).await.unwrap();

        assert_eq!(edited.id, p1);
        assert_eq!(edited, Product::from_input(p1.clone(), input));
        assert_eq!(ledger.product(&p1), Some(&edited));
    }

    #[tokio::test]
    async fn test_edit_missing_product_is_noop() {
        let (_, mut ledger) = ledger_with_p1("100", "40", 10).await;
        let before = ledger.products().to_vec();

        assert!(ledger
            .edit_product(&ProductId::from("nope"), product_input("1", "1", 1))
            .await
            .is_none());
        assert_eq!(ledger.products(), before.as_slice());
    }

    #[tokio::test]
    async fn test_add_and_delete_product() {
        let (_, mut ledger) = ledger_with_p1("100", "40", 10).await;

        let added = ledger.add_product(product_input("15", "5", 30)).await;
        assert_eq!(ledger.products().len(), 2);
        assert_eq!(ledger.products()[0].id, added.id);
        assert_eq!(ledger.products()[1].id, ProductId::from("p1"));

        ledger.delete_product(&added.id).await.unwrap();
        assert_eq!(ledger.products().len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_are_written_through() {
        let (backing, mut ledger) = ledger_with_p1("100", "40", 10).await;
        let p1 = ProductId::from("p1");

        let recorded = ledger.add_transaction(sale("200"), Some(&p1), Some(2)).await;
        let added = ledger.add_product(product_input("15", "5", 30)).await;

        let reloaded = LedgerService::load(backing.clone()).await;
        assert_eq!(reloaded.transactions(), ledger.transactions());
        assert_eq!(reloaded.products(), ledger.products());
        assert_eq!(reloaded.transactions()[0].id, recorded.id);
        assert_eq!(reloaded.products()[0].id, added.id);

        let raw = backing.get(store::TRANSACTIONS_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"type\":\"SALE\""));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 10000.00
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock after a sale is max(0, n - q)
        #[test]
        fn prop_sale_floors_stock(
            stock in 0u32..500,
            sold in 1u32..800,
            amount in amount_strategy(),
        ) {
            let remaining = runtime().block_on(async {
                let (_, mut ledger) = ledger_with_p1("10", "4", stock).await;
                let p1 = ProductId::from("p1");

                ledger
                    .add_transaction(
                        NewTransaction::new(TransactionType::Sale, amount),
                        Some(&p1),
                        Some(sold),
                    )
                    .await;

                ledger.product(&p1).unwrap().quantity
            });

            prop_assert_eq!(remaining, stock.saturating_sub(sold));
        }

        /// Deleting any transaction leaves every product quantity unchanged
        #[test]
        fn prop_delete_never_changes_stock(
            sales in proptest::collection::vec((amount_strategy(), 0u32..5), 1..10),
            pick in any::<prop::sample::Index>(),
        ) {
            let (before, deleted, after) = runtime().block_on(async {
                let (_, mut ledger) = ledger_with_p1("10", "4", 1000).await;
                let p1 = ProductId::from("p1");

                for (amount, quantity) in sales {
                    ledger
                        .add_transaction(
                            NewTransaction::new(TransactionType::Sale, amount),
                            Some(&p1),
                            Some(quantity),
                        )
                        .await;
                }

                let before = ledger.products().to_vec();
                let target = pick.get(ledger.transactions()).id.clone();
                let deleted = ledger.delete_transaction(&target).await.is_some();
                (before, deleted, ledger.products().to_vec())
            });

            prop_assert!(deleted);
            prop_assert_eq!(after, before);
        }
    }
}
