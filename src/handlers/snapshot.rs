use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
}

/// POST /api/snapshot/refresh
///
/// Drops the cached snapshot; the next read goes back to the store.
pub async fn refresh_snapshot(State(state): State<AppState>) -> Json<RefreshResponse> {
    state.snapshots.invalidate().await;
    info!(store = state.snapshots.store_name(), "Snapshot cache invalidated");

    Json(RefreshResponse {
        status: "invalidated",
    })
}
