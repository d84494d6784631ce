//! Core data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Date format of [`Transaction::date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction date (YYYY-MM-DD format)
    pub date: String,
    /// Free-text description
    pub description: String,
    /// Signed amount: negative is a debit, positive a credit
    pub amount: Decimal,
    /// Category label
    pub category: String,
    /// Masked account identifier
    pub account: String,
    /// Not yet settled
    pub pending: bool,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Transactions list response for the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total: usize,
}

impl TransactionsResponse {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let total = transactions.len();
        Self { transactions, total }
    }
}

/// Aggregate figures over a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_count: usize,
    pub pending_count: usize,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub net: Decimal,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
}

impl TransactionStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut stats = Self {
            total_count: transactions.len(),
            pending_count: 0,
            total_credits: Decimal::ZERO,
            total_debits: Decimal::ZERO,
            net: Decimal::ZERO,
            date_range_start: None,
            date_range_end: None,
        };

        let mut first: Option<NaiveDate> = None;
        let mut last: Option<NaiveDate> = None;

        for tx in transactions {
            if tx.pending {
                stats.pending_count += 1;
            }
            if tx.is_debit() {
                stats.total_debits += tx.amount;
            } else {
                stats.total_credits += tx.amount;
            }
            stats.net += tx.amount;

            if let Some(date) = tx.date_naive() {
                first = Some(first.map_or(date, |d| d.min(date)));
                last = Some(last.map_or(date, |d| d.max(date)));
            }
        }

        stats.date_range_start = first.map(|d| d.format(DATE_FORMAT).to_string());
        stats.date_range_end = last.map(|d| d.format(DATE_FORMAT).to_string());
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn tx(id: &str, date: &str, amount: &str, pending: bool) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            description: format!("Description {}", id),
            amount: Decimal::from_str(amount).unwrap(),
            category: "Misc".to_string(),
            account: "ES98...1234".to_string(),
            pending,
        }
    }

    #[test]
    fn test_transaction_methods() {
        let debit = tx("a", "2025-08-02", "-37.45", false);
        assert_eq!(debit.date_naive(), NaiveDate::from_ymd_opt(2025, 8, 2));
        assert!(debit.is_debit());

        let credit = tx("b", "2025-8-3", "1450.00", false);
        assert!(!credit.is_debit());
        assert!(credit.date_naive().is_some());

        assert!(tx("c", "not a date", "0", false).date_naive().is_none());
        assert!(!tx("d", "2025-08-02", "0", false).is_debit());
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let json = serde_json::to_value(tx("a", "2025-08-02", "-37.45", false)).unwrap();
        assert_eq!(json["amount"], serde_json::json!(-37.45));
        assert_eq!(json["pending"], serde_json::json!(false));
    }

    #[test]
    fn test_amount_deserializes_from_number() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":"tx","date":"2025-08-03","description":"Nómina","amount":1450.00,
                "category":"Income","account":"ES98...1234","pending":false}"#,
        )
        .unwrap();
        assert_eq!(tx.amount, Decimal::from(1450));
    }

    #[test]
    fn test_stats() {
        let txs = vec![
            tx("a", "2025-08-02", "-37.45", false),
            tx("b", "2025-08-03", "1450.00", false),
            tx("c", "2025-08-04", "-2.10", true),
        ];
        let stats = TransactionStats::from_transactions(&txs);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.total_credits, Decimal::from_str("1450.00").unwrap());
        assert_eq!(stats.total_debits, Decimal::from_str("-39.55").unwrap());
        assert_eq!(stats.net, Decimal::from_str("1410.45").unwrap());
        assert_eq!(stats.date_range_start.as_deref(), Some("2025-08-02"));
        assert_eq!(stats.date_range_end.as_deref(), Some("2025-08-04"));
    }

    #[test]
    fn test_stats_empty() {
        let stats = TransactionStats::from_transactions(&[]);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.net, Decimal::ZERO);
        assert!(stats.date_range_start.is_none());
    }

    #[test]
    fn test_response_total() {
        let response = TransactionsResponse::new(vec![tx("a", "2025-08-02", "1", false)]);
        assert_eq!(response.total, 1);
    }
}
