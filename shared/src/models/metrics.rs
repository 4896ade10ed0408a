//! Aggregate business metrics derived from the transaction ledger

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Transaction, TransactionType};

/// Headline numbers shown on the dashboard. Always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Net profit as a percentage of revenue; zero when there is no revenue
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_margin: Decimal,
    pub transaction_count: usize,
}

impl Default for BusinessMetrics {
    fn default() -> Self {
        compute_metrics(&[])
    }
}

/// Sum of amounts, clamped to the representable range instead of overflowing
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .unwrap_or_else(|| saturated(amount.is_sign_negative()))
    })
}

/// `part / whole * 100`, clamped when the quotient is not representable.
/// `whole` must be non-zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| saturated(part.is_sign_negative() != whole.is_sign_negative()))
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Sum of amounts over transactions of the given type
pub fn total_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
    sum_amounts(
        transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .map(|t| t.amount),
    )
}

/// Derive metrics from the full transaction collection.
///
/// Every reducer is an order-independent sum, so the result only depends on
/// the multiset of transactions. Totals beyond the decimal range saturate
/// rather than fail.
pub fn compute_metrics(transactions: &[Transaction]) -> BusinessMetrics {
    let total_revenue = total_by_type(transactions, TransactionType::Sale);
    let total_expenses = total_by_type(transactions, TransactionType::Expense);
    let net_profit = total_revenue
        .checked_sub(total_expenses)
        .unwrap_or_else(|| saturated(total_expenses > total_revenue));
    let profit_margin = if total_revenue > Decimal::ZERO {
        percentage(net_profit, total_revenue)
    } else {
        Decimal::ZERO
    };

    BusinessMetrics {
        total_revenue,
        total_expenses,
        net_profit,
        profit_margin,
        transaction_count: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionId;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn transaction(transaction_type: TransactionType, cents: i64) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            transaction_type,
            amount: Decimal::new(cents, 2),
            category: transaction_type.default_category().to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            supplier: None,
        }
    }

    #[test]
    fn test_empty_ledger_metrics() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert_eq!(metrics.total_expenses, Decimal::ZERO);
        assert_eq!(metrics.net_profit, Decimal::ZERO);
        assert_eq!(metrics.profit_margin, Decimal::ZERO);
        assert_eq!(metrics.transaction_count, 0);
    }

    #[test]
    fn test_mixed_ledger_metrics() {
        let transactions = vec![
            transaction(TransactionType::Sale, 20000),
            transaction(TransactionType::Sale, 30000),
            transaction(TransactionType::Expense, 12500),
        ];
        let metrics = compute_metrics(&transactions);

        assert_eq!(metrics.total_revenue, Decimal::from(500));
        assert_eq!(metrics.total_expenses, Decimal::from(125));
        assert_eq!(metrics.net_profit, Decimal::from(375));
        assert_eq!(metrics.profit_margin, Decimal::from(75));
        assert_eq!(metrics.transaction_count, 3);
    }

    #[test]
    fn test_expenses_only_margin_is_zero() {
        let metrics = compute_metrics(&[transaction(TransactionType::Expense, 5000)]);
        assert_eq!(metrics.net_profit, Decimal::from(-50));
        assert_eq!(metrics.profit_margin, Decimal::ZERO);
    }

    #[test]
    fn test_metrics_wire_format() {
        let json = serde_json::to_value(compute_metrics(&[])).unwrap();
        for key in ["totalRevenue", "totalExpenses", "netProfit", "profitMargin", "transactionCount"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_tiny_revenue_against_huge_expense() {
        let mut expense = transaction(TransactionType::Expense, 0);
        expense.amount = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        let metrics = compute_metrics(&[transaction(TransactionType::Sale, 1), expense]);

        assert_eq!(metrics.total_revenue, Decimal::new(1, 2));
        assert!(metrics.net_profit < Decimal::ZERO);
        assert_eq!(metrics.profit_margin, Decimal::MIN);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut big = transaction(TransactionType::Sale, 0);
        big.amount = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
        let metrics = compute_metrics(&[big.clone(), big]);

        assert_eq!(metrics.total_revenue, Decimal::MAX);
        assert_eq!(metrics.net_profit, Decimal::MAX);
        assert_eq!(metrics.profit_margin, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_margin_scaling_overflow_saturates() {
        let mut expense = transaction(TransactionType::Expense, 0);
        expense.amount = Decimal::from_i128_with_scale(10i128.pow(26), 0);
        let metrics = compute_metrics(&[transaction(TransactionType::Sale, 1), expense]);
        assert_eq!(metrics.profit_margin, Decimal::MIN);
    }

    #[test]
    fn test_percentage_and_sum_helpers() {
        assert_eq!(percentage(Decimal::from(1), Decimal::from(4)), Decimal::from(25));
        assert_eq!(percentage(Decimal::MAX, Decimal::new(1, 2)), Decimal::MAX);
        assert_eq!(sum_amounts([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(sum_amounts(Vec::new()), Decimal::ZERO);
    }

    fn transaction_strategy() -> impl Strategy<Value = Transaction> {
        (any::<bool>(), 1i64..=10_000_000i64).prop_map(|(sale, cents)| {
            let transaction_type = if sale {
                TransactionType::Sale
            } else {
                TransactionType::Expense
            };
            transaction(transaction_type, cents)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_net_profit_is_revenue_minus_expenses(
            transactions in prop::collection::vec(transaction_strategy(), 0..40)
        ) {
            let metrics = compute_metrics(&transactions);
            prop_assert_eq!(metrics.net_profit, metrics.total_revenue - metrics.total_expenses);
        }

        #[test]
        fn prop_count_matches_length(
            transactions in prop::collection::vec(transaction_strategy(), 0..40)
        ) {
            prop_assert_eq!(compute_metrics(&transactions).transaction_count, transactions.len());
        }

        #[test]
        fn prop_no_revenue_means_zero_margin(
            cents in prop::collection::vec(1i64..=1_000_000i64, 0..20)
        ) {
            let expenses: Vec<_> = cents
                .into_iter()
                .map(|c| transaction(TransactionType::Expense, c))
                .collect();
            prop_assert_eq!(compute_metrics(&expenses).profit_margin, Decimal::ZERO);
        }

        #[test]
        fn prop_metrics_ignore_order(
            mut transactions in prop::collection::vec(transaction_strategy(), 0..30)
        ) {
            let forward = compute_metrics(&transactions);
            transactions.reverse();
            prop_assert_eq!(compute_metrics(&transactions), forward);
        }
    }
}
