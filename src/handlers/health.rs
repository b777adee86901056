use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub caching_enabled: bool,
    pub snapshot_fetched_at: Option<DateTime<Utc>>,
    pub snapshot_age_secs: Option<i64>,
}

/// GET /health
///
/// Liveness plus the age of the cached snapshot. Never touches the store.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let fetched_at = state.snapshots.cached_at().await;

    Json(HealthResponse {
        status: "ok",
        store: state.snapshots.store_name(),
        caching_enabled: state.snapshots.caching_enabled(),
        snapshot_age_secs: fetched_at.map(|at| (Utc::now() - at).num_seconds()),
        snapshot_fetched_at: fetched_at,
    })
}
