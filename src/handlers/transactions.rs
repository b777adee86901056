//! Ledger handler
//!
//! GET /api/transactions endpoint for the filterable, sortable ledger table.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};

use crate::models::error::ErrorResponse;
use crate::models::ledger::{LedgerQuery, LedgerResponse, LedgerRow};
use crate::services::aggregation::summarize;
use crate::services::ledger::{filter_options, sort_records};
use crate::AppState;

/// GET /api/transactions
///
/// # Query Parameters
/// - `start`, `end`: inclusive YYYY-MM-DD bounds
/// - `property`, `category`, `description`: `|`-separated selections
/// - `sort`: date, property, description, category, amount (default: date)
/// - `direction`: asc, desc (default: desc)
///
/// # Response
/// - 200: Filtered and sorted rows with dropdown options
/// - 400: Invalid date, sort or direction
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (filter, sort) = query
        .filter()
        .and_then(|filter| Ok((filter, query.sort_spec()?)))
        .map_err(|e| {
            warn!(code = e.code, error = %e.message, "Rejected ledger query");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e)))
        })?;

    let snapshot = state.snapshots.current().await;

    let mut records = filter.apply(&snapshot.transactions);
    sort_records(&mut records, sort);

    let summary = summarize(&records, &state.settings.income_category);
    let options = filter_options(&snapshot.transactions);

    debug!(
        total = snapshot.transactions.len(),
        filtered = records.len(),
        sort = sort.column.as_str(),
        "Built ledger"
    );

    let filtered_count = records.len();
    let symbol = state.settings.currency_symbol.as_str();
    let rows = records
        .into_iter()
        .map(|tx| LedgerRow::from_transaction(tx, symbol))
        .collect();

    Ok(Json(LedgerResponse {
        rows,
        total_count: snapshot.transactions.len(),
        filtered_count,
        summary,
        options,
        sort,
        fetched_at: snapshot.fetched_at,
    }))
}
