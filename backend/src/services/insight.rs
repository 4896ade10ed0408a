//! Generative business insights
//!
//! Formats a snapshot of the ledger into a prompt and hands it to a text
//! generator. Every generator failure collapses into
//! [`AppError::InsightUnavailable`].

use std::sync::Arc;

use shared::{BusinessMetrics, Transaction};

use crate::error::{AppError, AppResult};
use crate::external::TextGenerator;

/// Model used for every insight request
pub const INSIGHT_MODEL: &str = "gemini-3-flash-preview";

/// Most recent transactions embedded in a prompt
pub const MAX_PROMPT_TRANSACTIONS: usize = 10;

/// Returned when the generator answers with no text
pub const EMPTY_INSIGHT_FALLBACK: &str = "Unable to generate insights at this moment.";

#[derive(Clone)]
pub struct InsightService {
    generator: Arc<dyn TextGenerator>,
}

impl InsightService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Ask the generator for advice on the given snapshot.
    ///
    /// `transactions` is expected newest first; only the first
    /// [`MAX_PROMPT_TRANSACTIONS`] are used.
    pub async fn request_insight(
        &self,
        metrics: &BusinessMetrics,
        transactions: &[Transaction],
    ) -> AppResult<String> {
        let prompt = build_prompt(metrics, transactions);

        tracing::debug!(
            transactions = transactions.len().min(MAX_PROMPT_TRANSACTIONS),
            "Requesting insight"
        );

        match self.generator.generate(INSIGHT_MODEL, &prompt).await {
            Ok(text) if text.trim().is_empty() => Ok(EMPTY_INSIGHT_FALLBACK.to_string()),
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!("Insight generation failed: {}", e);
                Err(AppError::InsightUnavailable)
            }
        }
    }
}

/// Prompt embedding headline metrics and the most recent transactions
pub fn build_prompt(metrics: &BusinessMetrics, transactions: &[Transaction]) -> String {
    let recent = &transactions[..transactions.len().min(MAX_PROMPT_TRANSACTIONS)];

    let recent_lines: String = recent
        .iter()
        .map(|t| {
            format!(
                "- {}: ${} ({} - {})\n",
                t.transaction_type, t.amount, t.category, t.description
            )
        })
        .collect();

    format!(
        "As a world-class business financial analyst, analyze the following business data \
         and provide 3-4 actionable insights or recommendations.\n\n\
         Business Metrics:\n\
         - Total Revenue: ${:.2}\n\
         - Total Expenses: ${:.2}\n\
         - Net Profit: ${:.2}\n\
         - Profit Margin: {:.2}%\n\
         \n\
         Recent Transactions (last {}):\n\
         {}\
         \n\
         Format your response in professional Markdown. Use bullet points and clear headings. \
         Be concise and focus on optimization.",
        metrics.total_revenue,
        metrics.total_expenses,
        metrics.net_profit,
        metrics.profit_margin,
        recent.len(),
        recent_lines,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{compute_metrics, NewTransaction, TransactionId, TransactionType};

    fn sale(amount: i64, description: &str) -> Transaction {
        let mut data = NewTransaction::new(TransactionType::Sale, Decimal::new(amount, 0));
        data.description = description.to_string();
        data.into_transaction(TransactionId::generate())
    }

    #[test]
    fn test_prompt_contains_metrics() {
        let transactions = vec![sale(200, "Two keyboards")];
        let prompt = build_prompt(&compute_metrics(&transactions), &transactions);

        assert!(prompt.contains("Total Revenue: $200.00"));
        assert!(prompt.contains("Total Expenses: $0.00"));
        assert!(prompt.contains("Profit Margin: 100.00%"));
        assert!(prompt.contains("- SALE: $200 (Product - Two keyboards)"));
    }

    #[test]
    fn test_prompt_layout() {
        let transactions = vec![sale(200, "Two keyboards")];
        let prompt = build_prompt(&compute_metrics(&transactions), &transactions);

        assert!(prompt.starts_with("As a world-class business financial analyst"));
        assert!(prompt.contains(
            "recommendations.\n\n\
             Business Metrics:\n\
             - Total Revenue: $200.00\n\
             - Total Expenses: $0.00\n\
             - Net Profit: $200.00\n\
             - Profit Margin: 100.00%\n\
             \n\
             Recent Transactions (last 1):\n\
             - SALE: $200 (Product - Two keyboards)\n\
             \n\
             Format your response"
        ));
        assert!(prompt.ends_with("focus on optimization."));
    }

    #[test]
    fn test_prompt_is_bounded() {
        let transactions: Vec<_> = (0..25).map(|i| sale(i + 1, &format!("order-{}", i))).collect();
        let prompt = build_prompt(&compute_metrics(&transactions), &transactions);

        assert!(prompt.contains("Recent Transactions (last 10):"));
        assert!(prompt.contains("order-0)"));
        assert!(prompt.contains("order-9)"));
        assert!(!prompt.contains("order-10)"));
        assert_eq!(prompt.matches("- SALE:").count(), MAX_PROMPT_TRANSACTIONS);
    }
}
