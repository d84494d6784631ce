//! Transaction model, query engine and read-only transaction store

pub mod error;
pub mod models;
pub mod query;
pub mod source;

use std::collections::HashSet;
use std::sync::Arc;

pub use error::{CoreError, ErrorCode, ErrorDetails};
pub use models::{Transaction, TransactionStats, TransactionsResponse, DATE_FORMAT};
pub use query::{apply, sort_transactions, FilterSpec, QueryEngine};
pub use source::{fixture_transactions, FixtureSource, JsonFileSource, TransactionSource};
pub use txlens_config::{SortBy, SortOrder, TextScope};

/// Read-only handle over a validated set of transactions
///
/// Cloning is cheap: the records are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    records: Arc<[Transaction]>,
    engine: QueryEngine,
}

impl TransactionStore {
    /// Validate `records` and wrap them with a description-only query engine
    pub fn new(records: Vec<Transaction>) -> Result<Self, CoreError> {
        Self::with_engine(records, QueryEngine::default())
    }

    pub fn with_engine(records: Vec<Transaction>, engine: QueryEngine) -> Result<Self, CoreError> {
        validate_records(&records)?;
        Ok(Self {
            records: records.into(),
            engine,
        })
    }

    /// Load from `source` and validate
    pub async fn load(source: &dyn TransactionSource, engine: QueryEngine) -> Result<Self, CoreError> {
        let records = source.load().await?;
        let store = Self::with_engine(records, engine)?;
        log::info!(
            "Loaded {} transactions from {} (text scope: {})",
            store.len(),
            source.describe(),
            engine.scope()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a transaction by id
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.records.iter().find(|tx| tx.id == id)
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|tx| seen.insert(tx.category.as_str()))
            .map(|tx| tx.category.clone())
            .collect()
    }

    /// Run the configured query engine over every record
    pub fn query(&self, filter: &FilterSpec) -> Vec<Transaction> {
        self.engine.apply(&self.records, filter)
    }

    pub fn stats(&self) -> TransactionStats {
        TransactionStats::from_transactions(&self.records)
    }
}

fn validate_records(records: &[Transaction]) -> Result<(), CoreError> {
    let mut ids = HashSet::new();
    for tx in records {
        if tx.id.trim().is_empty() {
            return Err(CoreError::InvalidRecord {
                id: tx.id.clone(),
                reason: "id must not be empty".to_string(),
            });
        }
        if tx.date_naive().is_none() {
            return Err(CoreError::InvalidRecord {
                id: tx.id.clone(),
                reason: format!("date '{}' is not a YYYY-MM-DD calendar date", tx.date),
            });
        }
        if !ids.insert(tx.id.as_str()) {
            return Err(CoreError::DuplicateId { id: tx.id.clone() });
        }
    }
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_store() -> TransactionStore {
        TransactionStore::new(fixture_transactions()).unwrap()
    }

    #[test]
    fn test_store_basics() {
        let store = fixture_store();
        assert_eq!(store.len(), 4);
        assert!(!store.is_empty());
        assert_eq!(store.transaction("tx_003").map(|tx| tx.description.as_str()), Some("Netflix"));
        assert!(store.transaction("tx_999").is_none());
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let mut records = fixture_transactions();
        let mut extra = records[0].clone();
        extra.id = "tx_005".to_string();
        records.push(extra);

        let store = TransactionStore::new(records).unwrap();
        assert_eq!(
            store.categories(),
            vec!["Groceries", "Income", "Subscriptions", "Dining"]
        );
    }

    #[test]
    fn test_store_query_uses_engine_scope() {
        let filter = FilterSpec::new().with_query("income");

        let description_only = fixture_store();
        assert!(description_only.query(&filter).is_empty());

        let wide = TransactionStore::with_engine(
            fixture_transactions(),
            QueryEngine::new(TextScope::DescriptionAndCategory),
        )
        .unwrap();
        let result = wide.query(&filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "tx_002");
    }

    #[test]
    fn test_query_leaves_store_untouched() {
        let store = fixture_store();
        let _ = store.query(&FilterSpec::new().sorted(SortBy::Amount, SortOrder::Asc));
        let order = store.query(&FilterSpec::new().sorted(SortBy::Date, SortOrder::Asc));
        let ids: Vec<&str> = order.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, vec!["tx_001", "tx_002", "tx_003", "tx_004"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut records = fixture_transactions();
        records.push(records[1].clone());
        let err = TransactionStore::new(records).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { ref id } if id == "tx_002"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut records = fixture_transactions();
        records[2].date = "04/08/2025".to_string();
        let err = TransactionStore::new(records).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { ref id, .. } if id == "tx_003"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut records = fixture_transactions();
        records[0].id = "  ".to_string();
        assert!(TransactionStore::new(records).is_err());
    }

    #[test]
    fn test_empty_store() {
        let store = TransactionStore::new(vec![]).unwrap();
        assert!(store.is_empty());
        assert!(store.categories().is_empty());
        assert!(store.query(&FilterSpec::default()).is_empty());
        assert_eq!(store.stats().total_count, 0);
    }

    #[tokio::test]
    async fn test_load_from_fixture_source() {
        let store = TransactionStore::load(&FixtureSource, QueryEngine::default())
            .await
            .unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.stats().pending_count, 1);
    }
}
