//! Transaction routes - Transaction list, search, category filter, sorting
//!
//! Features:
//! - Filter by free-text query and exact category
//! - Sort by date or amount, ascending or descending
//! - HTMX partial page updates
//!
//! Structure:
//! - params.rs: Query-string parsing into a FilterSpec
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;
pub mod params;

pub use api::{
    api_categories,
    api_transaction_detail,
    api_transactions,
    htmx_transaction_detail,
    htmx_transactions_list,
};

pub use page::page_transactions;
