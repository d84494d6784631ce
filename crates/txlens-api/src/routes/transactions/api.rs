//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered and sorted transactions (JSON)
//! - api_transaction_detail: Single transaction (JSON)
//! - api_categories: Distinct categories (JSON)
//! - htmx_transactions_list: Filtered list (HTML fragment)
//! - htmx_transaction_detail: Transaction detail (HTML fragment)

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use txlens_core::{Transaction, TransactionsResponse};
use txlens_utils::{escape_html, format_amount, format_date};

use super::params::{filter_from_params, to_query_string};
use crate::{ApiError, AppState};

/// Get filtered and sorted transactions (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let filter = filter_from_params(&params, &state.config.query)?;
    let transactions = state.store.query(&filter);
    log::debug!("api_transactions: {:?} matched {}", filter, transactions.len());
    Ok(Json(TransactionsResponse::new(transactions)))
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    state
        .store
        .transaction(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("transaction {}", id),
        })
}

/// Get the distinct categories, in order of first appearance (JSON API)
pub async fn api_categories(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "categories": state.store.categories() }))
}

/// HTMX: Transactions list - Partial page update
pub async fn htmx_transactions_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match filter_from_params(&params, &state.config.query) {
        Ok(filter) => {
            let transactions = state.store.query(&filter);
            Html(render_transactions_list(&transactions, &to_query_string(&filter), &state)).into_response()
        }
        Err(e) => (e.status(), Html(render_error(&e.to_string()))).into_response(),
    }
}

/// HTMX: Transaction detail
pub async fn htmx_transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.transaction(&id) {
        Some(tx) => Html(render_transaction_detail(tx)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(render_error(&format!("Transaction not found: {}", id))),
        )
            .into_response(),
    }
}

// ==================== Rendering ====================

/// Render the list heading, rows and empty state
pub(crate) fn render_transactions_list(
    transactions: &[Transaction],
    query_string: &str,
    state: &AppState,
) -> String {
    let config = &state.config;
    let mut html = format!(
        r#"<div class='px-6 py-4 border-b flex items-center justify-between'>
            <h2 class='text-lg font-semibold'>Transactions ({})</h2>
            <a href='/api/transactions?{}' class='text-sm text-indigo-600 hover:text-indigo-800'>JSON</a>
        </div>"#,
        transactions.len(),
        escape_html(query_string)
    );

    if transactions.is_empty() {
        html.push_str(r#"<div class='p-8 text-center text-gray-500'><p>No transactions found</p></div>"#);
        return html;
    }

    html.push_str("<div class='divide-y divide-gray-200' role='list'>");
    for tx in transactions {
        let pending_badge = if tx.pending {
            r#"<span class='inline-flex items-center px-2 py-1 rounded-full text-xs font-medium bg-yellow-100 text-yellow-800'>Pending</span>"#
        } else {
            ""
        };
        let amount_color = if tx.is_debit() { "text-red-600" } else { "text-green-600" };
        let id = escape_html(&tx.id);
        let encoded_id = urlencoding::encode(&tx.id);

        html.push_str(&format!(
            r#"<div class='px-6 py-4 hover:bg-gray-50 focus-within:bg-gray-50 cursor-pointer' tabindex='0' role='listitem'
                hx-get='/transactions/{}/detail' hx-target='#tx-detail-{}' hx-swap='innerHTML'>
                <div class='flex justify-between items-start'>
                    <div class='flex-1'>
                        <div class='flex items-center space-x-2'>
                            <h3 class='font-medium text-gray-900'>{}</h3>
                            {}
                        </div>
                        <div class='mt-1 flex items-center space-x-4 text-sm text-gray-500'>
                            <span>{}</span>
                            <span class='px-2 py-1 bg-gray-100 rounded text-xs'>{}</span>
                            <span>{}</span>
                        </div>
                    </div>
                    <div class='text-right'>
                        <span class='font-semibold {}'>{}</span>
                    </div>
                </div>
                <div id='tx-detail-{}'></div>
            </div>"#,
            encoded_id,
            id,
            escape_html(&tx.description),
            pending_badge,
            escape_html(&format_date(&tx.date, &config.display.date_format)),
            escape_html(&tx.category),
            escape_html(&tx.account),
            amount_color,
            escape_html(&format_amount(tx.amount, &config.currency)),
            id
        ));
    }
    html.push_str("</div>");
    html
}

fn render_transaction_detail(tx: &Transaction) -> String {
    let rows = [
        ("ID", tx.id.clone()),
        ("Date", tx.date.clone()),
        ("Description", tx.description.clone()),
        ("Amount", tx.amount.to_string()),
        ("Category", tx.category.clone()),
        ("Account", tx.account.clone()),
        ("Status", if tx.pending { "Pending" } else { "Settled" }.to_string()),
    ];

    let mut html = String::from("<dl class='mt-3 grid grid-cols-2 gap-x-4 gap-y-1 text-sm bg-gray-50 rounded p-3'>");
    for (label, value) in rows {
        html.push_str(&format!(
            "<dt class='text-gray-500'>{}</dt><dd class='font-mono'>{}</dd>",
            label,
            escape_html(&value)
        ));
    }
    html.push_str("</dl>");
    html
}

pub(crate) fn render_error(message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-md p-4' role='alert'><p class='text-red-800'>Error: {}</p></div>"#,
        escape_html(message)
    )
}

// ==================== Tests ====================
