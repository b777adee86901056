//! Property handlers
//!
//! GET /api/properties (portfolio overview) and
//! GET /api/properties/{id}/analysis (single property panel).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::models::error::ErrorResponse;
use crate::models::property::{PortfolioOverview, PropertyAnalysis};
use crate::services::property_analysis::{analyze_property, portfolio_overview};
use crate::AppState;

/// GET /api/properties
pub async fn get_portfolio(State(state): State<AppState>) -> Json<PortfolioOverview> {
    let snapshot = state.snapshots.current().await;
    Json(portfolio_overview(&snapshot, &state.settings))
}

/// GET /api/properties/{id}/analysis
///
/// # Response
/// - 200: Capital position, metrics, scenarios and appreciation timeline
/// - 400: Non-numeric id
/// - 404: No property with that id
pub async fn get_property_analysis(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PropertyAnalysis>, (StatusCode, Json<ErrorResponse>)> {
    let id: i64 = raw_id.trim().parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                format!("Invalid property id: '{}'", raw_id),
                "INVALID_PROPERTY_ID",
            )),
        )
    })?;

    let snapshot = state.snapshots.current().await;

    let Some(property) = snapshot.property(id) else {
        warn!(property_id = id, "Property not found");
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Property not found", "PROPERTY_NOT_FOUND")),
        ));
    };

    let analysis = analyze_property(property, &snapshot, &state.settings, Utc::now().date_naive());

    info!(
        property_id = id,
        scenarios = analysis.scenarios.len(),
        timeline_points = analysis.timeline.points.len(),
        projected = analysis.timeline.breakeven.is_projected(),
        "Built property analysis"
    );

    Ok(Json(analysis))
}
