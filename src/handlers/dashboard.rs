//! Summary dashboard handler
//!
//! GET /api/dashboard/summary endpoint: KPI cards and breakdowns over the
//! filtered ledger.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};

use crate::models::dashboard::{income_cards, DashboardSummaryResponse};
use crate::models::error::ErrorResponse;
use crate::models::ledger::LedgerQuery;
use crate::services::aggregation::{
    breakdown_by_category, breakdown_by_property, expense_pie, summarize,
};
use crate::AppState;

/// GET /api/dashboard/summary
///
/// # Query Parameters
/// Same date and multi-select filters as `/api/transactions`; sort
/// parameters are ignored.
///
/// # Response
/// - 200: Cards, category and property breakdowns, expense pie
/// - 400: Invalid date parameter
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<DashboardSummaryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let filter = query.filter().map_err(|e| {
        warn!(code = e.code, error = %e.message, "Rejected summary query");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(e)))
    })?;

    let snapshot = state.snapshots.current().await;
    let records = filter.apply(&snapshot.transactions);

    let summary = summarize(&records, &state.settings.income_category);
    let categories = breakdown_by_category(&records);
    let properties = breakdown_by_property(&records);
    let expense_pie = expense_pie(&categories);

    debug!(
        records = records.len(),
        categories = categories.len(),
        filtered = filter.is_active(),
        "Built dashboard summary"
    );

    Ok(Json(DashboardSummaryResponse {
        cards: income_cards(&summary, &state.settings.currency_symbol),
        summary,
        categories,
        properties,
        expense_pie,
        filters_active: filter.is_active(),
        fetched_at: snapshot.fetched_at,
    }))
}
