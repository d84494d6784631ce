//! Transaction data sources
//!
//! - FixtureSource: the built-in sample records
//! - JsonFileSource: a JSON array of transactions on disk

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::models::Transaction;

/// Something that can produce the full list of transactions
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Load every record, in source order
    async fn load(&self) -> Result<Vec<Transaction>, CoreError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// The four built-in sample records
pub fn fixture_transactions() -> Vec<Transaction> {
    let record = |id: &str, date: &str, description: &str, cents: i64, category: &str, pending: bool| {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            description: description.to_string(),
            amount: Decimal::new(cents, 2),
            category: category.to_string(),
            account: "ES98...1234".to_string(),
            pending,
        }
    };

    vec![
        record("tx_001", "2025-08-02", "Supermercado DIA", -3745, "Groceries", false),
        record("tx_002", "2025-08-03", "Nómina", 145000, "Income", false),
        record("tx_003", "2025-08-04", "Netflix", -1299, "Subscriptions", false),
        record("tx_004", "2025-08-04", "Café", -210, "Dining", true),
    ]
}

/// Serves [`fixture_transactions`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

#[async_trait]
impl TransactionSource for FixtureSource {
    async fn load(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(fixture_transactions())
    }

    fn describe(&self) -> String {
        "built-in fixture".to_string()
    }
}

/// Reads a JSON array of transactions from a file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Transaction>, CoreError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let transactions: Vec<Transaction> = serde_json::from_str(&content)?;
        log::debug!(
            "Read {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }

    fn describe(&self) -> String {
        format!("JSON file {}", self.path.display())
    }
}
