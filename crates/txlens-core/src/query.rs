//! Filter-and-sort query engine
//!
//! A query runs three steps in a fixed order: the free-text filter, the
//! category filter, then a stable sort on a single key. The input slice is
//! never modified; matching records are cloned into a new vector.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use txlens_config::{SortBy, SortOrder, TextScope};

use crate::models::Transaction;

/// Filter and sort parameters for one query
///
/// `None` and `Some("")` both mean "no constraint" for `query` and `category`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub query: Option<String>,
    pub category: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sorted(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// The text query, if it constrains anything
    pub fn active_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// The category, if it constrains anything
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Query engine with a fixed text-match scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryEngine {
    scope: TextScope,
}

impl QueryEngine {
    pub fn new(scope: TextScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> TextScope {
        self.scope
    }

    /// Filter and sort `records` according to `filter`
    pub fn apply(&self, records: &[Transaction], filter: &FilterSpec) -> Vec<Transaction> {
        let needle = filter.active_query().map(str::to_lowercase);
        let category = filter.active_category();

        let mut matched: Vec<Transaction> = records
            .iter()
            .filter(|tx| needle.as_deref().map_or(true, |q| self.matches_text(tx, q)))
            .filter(|tx| category.map_or(true, |c| tx.category == c))
            .cloned()
            .collect();

        sort_transactions(&mut matched, filter.sort_by, filter.sort_order);
        matched
    }

    /// `needle` must already be lowercase
    fn matches_text(&self, tx: &Transaction, needle: &str) -> bool {
        if tx.description.to_lowercase().contains(needle) {
            return true;
        }
        match self.scope {
            TextScope::Description => false,
            TextScope::DescriptionAndCategory => tx.category.to_lowercase().contains(needle),
        }
    }
}

/// Filter and sort with the default (description-only) text scope
pub fn apply(records: &[Transaction], filter: &FilterSpec) -> Vec<Transaction> {
    QueryEngine::default().apply(records, filter)
}

/// Stable in-place sort on one key.
///
/// Descending order reverses the key, not the output, so records with equal
/// keys keep their input order in both directions. Dates that do not parse
/// sort before every valid date.
pub fn sort_transactions(transactions: &mut [Transaction], sort_by: SortBy, sort_order: SortOrder) {
    match (sort_by, sort_order) {
        (SortBy::Date, SortOrder::Asc) => transactions.sort_by_cached_key(|tx| tx.date_naive()),
        (SortBy::Date, SortOrder::Desc) => {
            transactions.sort_by_cached_key(|tx| Reverse(tx.date_naive()))
        }
        (SortBy::Amount, SortOrder::Asc) => transactions.sort_by_key(|tx| tx.amount),
        (SortBy::Amount, SortOrder::Desc) => transactions.sort_by_key(|tx| Reverse(tx.amount)),
    }
}

// ==================== Tests ====================
