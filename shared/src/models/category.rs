//! Recommended category vocabulary per transaction type
//!
//! The lists are advisory: they drive form defaults and boundary hints, but
//! the ledger stores whatever category text it is given.

use super::TransactionType;

/// Categories offered for sales
pub const SALE_CATEGORIES: &[&str] = &["Product", "Service", "Subscription", "Consulting", "Other"];

/// Categories offered for expenses
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Rent",
    "Salaries",
    "Marketing",
    "Software",
    "Utilities",
    "Inventory",
    "Other",
];

impl TransactionType {
    /// Recommended categories for this transaction type
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Sale => SALE_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// First entry of the vocabulary, preselected in forms
    pub fn default_category(&self) -> &'static str {
        self.categories()[0]
    }
}

/// Whether `category` belongs to the recommended vocabulary of `transaction_type`
pub fn is_known_category(transaction_type: TransactionType, category: &str) -> bool {
    transaction_type
        .categories()
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category))
}
