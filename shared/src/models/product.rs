//! Inventory products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::types::ProductId;

/// A product held in inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Sale unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Acquisition unit cost
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    /// Units in stock, never negative
    pub quantity: u32,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// Every product field except the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    pub quantity: u32,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl Product {
    pub fn from_input(id: ProductId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            cost_price: input.cost_price,
            quantity: input.quantity,
            sku: input.sku,
            description: input.description,
            supplier: input.supplier,
        }
    }

    /// Replace every field but the id
    pub fn replace(&mut self, input: ProductInput) {
        *self = Product::from_input(self.id.clone(), input);
    }

    /// Take `units` out of stock, flooring at zero
    pub fn decrement_stock(&mut self, units: u32) {
        self.quantity = self.quantity.saturating_sub(units);
    }

    /// Gross margin in percent, `None` when the product has no price
    pub fn margin(&self) -> Option<Decimal> {
        product_margin(self.price, self.cost_price)
    }
}

/// `(price - cost) / price * 100`, undefined for a zero price.
/// Margins beyond the decimal range saturate.
pub fn product_margin(price: Decimal, cost_price: Decimal) -> Option<Decimal> {
    if price > Decimal::ZERO {
        let markup = price
            .checked_sub(cost_price)
            .unwrap_or(if cost_price > price { Decimal::MIN } else { Decimal::MAX });
        Some(percentage(markup, price))
    } else {
        None
    }
}

/// Sample catalogue used when no usable product data is stored
pub fn seed_products() -> Vec<Product> {
    let seed = |id: &str, name: &str, price: Decimal, cost_price: Decimal, quantity: u32, sku: &str, description: &str| {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            price,
            cost_price,
            quantity,
            sku: sku.to_string(),
            description: Some(description.to_string()),
            supplier: None,
        }
    };

    vec![
        seed(
            "p1",
            "Wireless Headphones",
            Decimal::new(9999, 2),
            Decimal::new(4500, 2),
            15,
            "WH-001",
            "Noise cancelling high fidelity headphones",
        ),
        seed(
            "p2",
            "Mechanical Keyboard",
            Decimal::new(14950, 2),
            Decimal::new(8500, 2),
            8,
            "MK-204",
            "RGB backlit mechanical keyboard with blue switches",
        ),
        seed(
            "p3",
            "Ergonomic Mouse",
            Decimal::new(5999, 2),
            Decimal::new(2500, 2),
            24,
            "EM-102",
            "Vertical mouse for better wrist health",
        ),
        seed(
            "p4",
            "USB-C Hub",
            Decimal::new(3499, 2),
            Decimal::new(1250, 2),
            42,
            "UH-550",
            "7-in-1 USB-C adapter for laptops",
        ),
        seed(
            "p5",
            "Monitor Stand",
            Decimal::new(4500, 2),
            Decimal::new(1800, 2),
            5,
            "MS-900",
            "Adjustable wooden monitor stand",
        ),
    ]
}
