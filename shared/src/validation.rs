//! Boundary validation for user input
//!
//! The ledger trusts its caller; these checks run where input enters the
//! system (HTTP handlers, WASM form helpers) before a command reaches it.

use rust_decimal::Decimal;

use crate::models::{NewTransaction, ProductInput, TransactionType};

// ============================================================================
// Transaction Validations
// ============================================================================

/// Validate that a transaction amount is strictly positive
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Please enter a valid amount greater than zero");
    }
    Ok(())
}

/// Validate the quantity requested for a sale against current stock
pub fn validate_sale_quantity(requested: u32, in_stock: u32) -> Result<(), &'static str> {
    if requested == 0 {
        return Err("Quantity must be at least 1");
    }
    if requested > in_stock {
        return Err("Requested quantity exceeds available stock");
    }
    Ok(())
}

/// Trim free-text fields and drop the supplier from sales
pub fn normalize_transaction(mut data: NewTransaction) -> NewTransaction {
    data.category = data.category.trim().to_string();
    data.description = data.description.trim().to_string();
    data.supplier = match data.transaction_type {
        TransactionType::Sale => None,
        TransactionType::Expense => data.supplier.map(|s| s.trim().to_string()),
    };
    if data.category.is_empty() {
        data.category = data.transaction_type.default_category().to_string();
    }
    data
}

// ============================================================================
// Product Validations
// ============================================================================

/// Validate that a product has a display name
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Product name is required");
    }
    Ok(())
}

/// Validate that a product has a SKU
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.trim().is_empty() {
        return Err("SKU is required");
    }
    Ok(())
}

/// Validate a unit price or unit cost
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Run every product check, reporting the first failing field
pub fn validate_product_input(input: &ProductInput) -> Result<(), (&'static str, &'static str)> {
    validate_product_name(&input.name).map_err(|e| ("name", e))?;
    validate_sku(&input.sku).map_err(|e| ("sku", e))?;
    validate_unit_price(input.price).map_err(|e| ("price", e))?;
    validate_unit_price(input.cost_price).map_err(|e| ("costPrice", e))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product_input() -> ProductInput {
        ProductInput {
            name: "Webcam".to_string(),
            price: Decimal::new(4999, 2),
            cost_price: Decimal::new(2000, 2),
            quantity: 4,
            sku: "WC-10".to_string(),
            description: None,
            supplier: None,
        }
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::new(1, 2)).is_ok());
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(2, 10).is_ok());
        assert!(validate_sale_quantity(10, 10).is_ok());
        assert!(validate_sale_quantity(11, 10).is_err());
        assert!(validate_sale_quantity(0, 10).is_err());
    }

    #[test]
    fn test_normalize_drops_supplier_from_sales() {
        let mut sale = NewTransaction::new(TransactionType::Sale, Decimal::from(5));
        sale.supplier = Some("Should vanish".to_string());
        sale.category = "   ".to_string();
        let sale = normalize_transaction(sale);
        assert!(sale.supplier.is_none());
        assert_eq!(sale.category, "Product");

        let mut expense = NewTransaction::new(TransactionType::Expense, Decimal::from(5));
        expense.supplier = Some(" Acme ".to_string());
        let expense = normalize_transaction(expense);
        assert_eq!(expense.supplier.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_validate_product_input() {
        assert!(validate_product_input(&product_input()).is_ok());

        let mut missing_name = product_input();
        missing_name.name = " ".to_string();
        assert_eq!(validate_product_input(&missing_name).unwrap_err().0, "name");

        let mut missing_sku = product_input();
        missing_sku.sku = String::new();
        assert_eq!(validate_product_input(&missing_sku).unwrap_err().0, "sku");

        let mut negative_cost = product_input();
        negative_cost.cost_price = Decimal::from(-1);
        assert_eq!(validate_product_input(&negative_cost).unwrap_err().0, "costPrice");
    }

    #[test]
    fn test_free_price_is_allowed() {
        let mut free = product_input();
        free.price = Decimal::ZERO;
        assert!(validate_product_input(&free).is_ok());
    }
}
