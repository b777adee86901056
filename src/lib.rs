// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::DashboardSettings;
use services::snapshot::SnapshotService;

#[derive(Clone)]
pub struct AppState {
    pub snapshots: SnapshotService,
    pub settings: Arc<DashboardSettings>,
}

pub mod entities {
    pub mod prelude;
    pub mod capital_transactions;
    pub mod properties_master;
    pub mod scenarios;
    pub mod transactions;
    pub mod valuations;
}

pub mod services {
    pub mod aggregation;
    pub mod breakeven;
    pub mod coerce;
    pub mod formatting;
    pub mod ledger;
    pub mod postgres_store;
    pub mod property_analysis;
    pub mod rest_store;
    pub mod snapshot;
    pub mod store;
}

pub mod config;
pub mod models;
pub mod handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/dashboard/summary",
            get(handlers::dashboard::get_dashboard_summary),
        )
        .route("/api/transactions", get(handlers::transactions::get_transactions))
        .route("/api/properties", get(handlers::properties::get_portfolio))
        .route(
            "/api/properties/{id}/analysis",
            get(handlers::properties::get_property_analysis),
        )
        .route(
            "/api/snapshot/refresh",
            post(handlers::snapshot::refresh_snapshot),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
