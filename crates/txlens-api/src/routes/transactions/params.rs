//! Query-string parameters for the transaction endpoints
//!
//! Parameters: `query`, `category`, `sortBy`, `sortOrder`. Empty values fall
//! back to the configured defaults; unknown sort values are rejected.

use std::collections::HashMap;

use txlens_config::QueryConfig;
use txlens_core::{FilterSpec, SortBy, SortOrder};

use crate::ApiError;

pub const QUERY: &str = "query";
pub const CATEGORY: &str = "category";
pub const SORT_BY: &str = "sortBy";
pub const SORT_ORDER: &str = "sortOrder";

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Build a filter from raw query parameters
pub fn filter_from_params(
    params: &HashMap<String, String>,
    defaults: &QueryConfig,
) -> Result<FilterSpec, ApiError> {
    let sort_by = match non_empty(params, SORT_BY) {
        Some(raw) => raw.parse::<SortBy>().map_err(reject)?,
        None => defaults.default_sort_by,
    };
    let sort_order = match non_empty(params, SORT_ORDER) {
        Some(raw) => raw.parse::<SortOrder>().map_err(reject)?,
        None => defaults.default_sort_order,
    };

    Ok(FilterSpec {
        query: non_empty(params, QUERY).map(str::to_string),
        category: non_empty(params, CATEGORY).map(str::to_string),
        sort_by,
        sort_order,
    })
}

fn reject(message: String) -> ApiError {
    log::warn!("Rejected query parameter: {}", message);
    ApiError::BadRequest { message }
}

/// Encode a filter back into a query string (without the leading `?`)
pub fn to_query_string(filter: &FilterSpec) -> String {
    let mut parts = Vec::new();
    if let Some(q) = filter.active_query() {
        parts.push(format!("{}={}", QUERY, urlencoding::encode(q)));
    }
    if let Some(c) = filter.active_category() {
        parts.push(format!("{}={}", CATEGORY, urlencoding::encode(c)));
    }
    parts.push(format!("{}={}", SORT_BY, filter.sort_by));
    parts.push(format!("{}={}", SORT_ORDER, filter.sort_order));
    parts.join("&")
}
