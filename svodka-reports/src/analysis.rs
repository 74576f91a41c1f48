//! Spend summary for a card: total, cashback earned, largest transactions.

use std::cmp::Ordering;

use serde::Serialize;
use svodka_core::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CardSummary {
    pub total_spent: f64,
    /// One unit of cashback per full hundred of total spend.
    pub cashback: f64,
    /// Up to five transactions, largest payment amount first.
    pub top_transactions: Vec<Transaction>,
}

pub fn analyze_transactions(transactions: &[Transaction]) -> CardSummary {
    if transactions.is_empty() {
        return CardSummary::default();
    }

    let total_spent: f64 = transactions.iter().filter_map(|t| t.payment_amount).sum();
    let cashback = (total_spent / 100.0).floor();

    let mut ranked: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.payment_amount.is_some())
        .collect();
    ranked.sort_by(|a, b| {
        b.payment_amount
            .partial_cmp(&a.payment_amount)
            .unwrap_or(Ordering::Equal)
    });
    let top_transactions = ranked.into_iter().take(5).cloned().collect();

    CardSummary {
        total_spent,
        cashback,
        top_transactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svodka_core::Status;

    fn txn(day: u32, payment_amount: Option<f64>) -> Transaction {
        Transaction {
            operation_date: chrono::NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            card_number: Some("*7197".to_string()),
            status: Status::Success,
            operation_amount: payment_amount,
            operation_currency: Some("RUB".to_string()),
            payment_amount,
            payment_currency: Some("RUB".to_string()),
            category: Some("Еда".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_total_cashback_and_top_five() {
        let txns: Vec<Transaction> = [500.0, 1500.0, 3000.0, 1200.0, 7000.0, 2500.0]
            .iter()
            .enumerate()
            .map(|(i, &amount)| txn(i as u32 + 1, Some(amount)))
            .collect();

        let summary = analyze_transactions(&txns);
        assert_eq!(summary.total_spent, 15700.0);
        assert_eq!(summary.cashback, 157.0);

        let top: Vec<f64> = summary
            .top_transactions
            .iter()
            .filter_map(|t| t.payment_amount)
            .collect();
        assert_eq!(top, vec![7000.0, 3000.0, 2500.0, 1500.0, 1200.0]);
    }

    #[test]
    fn test_empty_table() {
        let summary = analyze_transactions(&[]);
        assert_eq!(summary.total_spent, 0.0);
        assert_eq!(summary.cashback, 0.0);
        assert!(summary.top_transactions.is_empty());
    }

    #[test]
    fn test_fewer_than_five_transactions() {
        let txns = vec![txn(1, Some(250.0)), txn(2, Some(100.0))];
        let summary = analyze_transactions(&txns);
        assert_eq!(summary.top_transactions.len(), 2);
        assert_eq!(summary.cashback, 3.0);
    }

    #[test]
    fn test_rows_without_payment_amount_are_not_ranked() {
        let txns = vec![txn(1, Some(300.0)), txn(2, None)];
        let summary = analyze_transactions(&txns);
        assert_eq!(summary.total_spent, 300.0);
        assert_eq!(summary.top_transactions.len(), 1);
    }

    #[test]
    fn test_cashback_floors_toward_zero_spend() {
        let txns = vec![txn(1, Some(199.99))];
        assert_eq!(analyze_transactions(&txns).cashback, 1.0);
    }
}
