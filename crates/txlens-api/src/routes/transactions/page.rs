//! Transactions page rendering - Full page endpoint
//!
//! The page renders the filter form and the first list server-side; the form
//! then refreshes `#transactions-content` through `/transactions/list`.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use txlens_core::{FilterSpec, SortBy, SortOrder};
use txlens_utils::{escape_html, format_amount, format_date};

use super::api::{render_error, render_transactions_list};
use super::params::{filter_from_params, to_query_string, CATEGORY, QUERY};
use crate::AppState;

/// Transactions page - Filter form, summary cards and list
pub async fn page_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (filter, content, status) = match filter_from_params(&params, &state.config.query) {
        Ok(filter) => {
            let transactions = state.store.query(&filter);
            let list = render_transactions_list(&transactions, &to_query_string(&filter), &state);
            (filter, list, axum::http::StatusCode::OK)
        }
        Err(e) => {
            let fallback = FilterSpec {
                query: params.get(QUERY).cloned(),
                category: params.get(CATEGORY).cloned(),
                ..FilterSpec::default()
            };
            (fallback, render_error(&e.to_string()), e.status())
        }
    };

    let stats = state.store.stats();
    let currency = &state.config.currency;
    let date_format = &state.config.display.date_format;
    let period = match (&stats.date_range_start, &stats.date_range_end) {
        (Some(start), Some(end)) => format!(
            "{} to {}",
            format_date(start, date_format),
            format_date(end, date_format)
        ),
        _ => "No transactions".to_string(),
    };

    let inner_content = format!(
        r#"<div class='mb-8'>
            <h1 class='text-3xl font-bold text-gray-900 mb-2'>Transactions</h1>
            <p class='text-gray-600'>Filter and sort your financial transactions</p>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-3 mb-6'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Transactions</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-yellow-50 p-3 rounded-lg border border-yellow-100'><p class='text-xs text-yellow-700'>Pending</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Credits</p><p class='text-sm font-medium truncate'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100'><p class='text-xs text-red-600'>Debits</p><p class='text-sm font-medium truncate'>{}</p></div>
            <div class='bg-blue-50 p-3 rounded-lg border border-blue-100'><p class='text-xs text-blue-600'>Net</p><p class='text-sm font-medium truncate'>{}</p></div>
            <div class='bg-gray-100 p-3 rounded-lg border border-gray-200'><p class='text-xs text-gray-600'>Period</p><p class='text-sm font-medium truncate'>{}</p></div>
        </div>
        {}
        <div id='transactions-content' class='bg-white rounded-lg shadow-sm border'>
            {}
        </div>"#,
        stats.total_count,
        stats.pending_count,
        escape_html(&format_amount(stats.total_credits, currency)),
        escape_html(&format_amount(stats.total_debits, currency)),
        escape_html(&format_amount(stats.net, currency)),
        escape_html(&period),
        render_filter_form(&filter, &state.store.categories()),
        content
    );

    let page = crate::page_response(&headers, "Transactions", &inner_content);
    (status, Html(page)).into_response()
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        "selected"
    } else {
        ""
    }
}

/// Filter form; submits to the full page without JavaScript, via HTMX otherwise
fn render_filter_form(filter: &FilterSpec, categories: &[String]) -> String {
    let current_category = filter.active_category().unwrap_or("");

    let mut category_options = format!(
        "<option value='' {}>All categories</option>",
        selected(current_category.is_empty())
    );
    for category in categories {
        category_options.push_str(&format!(
            "<option value='{}' {}>{}</option>",
            escape_html(category),
            selected(category == current_category),
            escape_html(category)
        ));
    }

    format!(
        r#"<form action='/transactions' method='get' class='bg-white p-6 rounded-lg shadow-sm border mb-6'
            hx-get='/transactions/list' hx-target='#transactions-content' hx-trigger='change, keyup changed delay:300ms from:#search'>
            <h2 class='text-lg font-semibold mb-4'>Filters</h2>
            <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4'>
                <div>
                    <label for='search' class='block text-sm font-medium text-gray-700 mb-1'>Search</label>
                    <input id='search' type='text' name='query' value='{}' placeholder='Search transactions...'
                        class='w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500'>
                </div>
                <div>
                    <label for='category' class='block text-sm font-medium text-gray-700 mb-1'>Category</label>
                    <select id='category' name='category' class='w-full px-3 py-2 border border-gray-300 rounded-md'>{}</select>
                </div>
                <div>
                    <label for='sortBy' class='block text-sm font-medium text-gray-700 mb-1'>Sort by</label>
                    <select id='sortBy' name='sortBy' class='w-full px-3 py-2 border border-gray-300 rounded-md'>
                        <option value='date' {}>Date</option>
                        <option value='amount' {}>Amount</option>
                    </select>
                </div>
                <div>
                    <label for='sortOrder' class='block text-sm font-medium text-gray-700 mb-1'>Order</label>
                    <select id='sortOrder' name='sortOrder' class='w-full px-3 py-2 border border-gray-300 rounded-md'>
                        <option value='desc' {}>Descending</option>
                        <option value='asc' {}>Ascending</option>
                    </select>
                </div>
            </div>
            <noscript><button type='submit' class='mt-4 px-4 py-2 bg-indigo-600 text-white rounded'>Apply</button></noscript>
        </form>"#,
        escape_html(filter.active_query().unwrap_or("")),
        category_options,
        selected(filter.sort_by == SortBy::Date),
        selected(filter.sort_by == SortBy::Amount),
        selected(filter.sort_order == SortOrder::Desc),
        selected(filter.sort_order == SortOrder::Asc),
    )
}
