use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_dashboard::config::{AppConfig, StoreBackend};
use property_dashboard::services::postgres_store::PostgresStore;
use property_dashboard::services::rest_store::RestStore;
use property_dashboard::services::snapshot::SnapshotService;
use property_dashboard::services::store::PortfolioStore;
use property_dashboard::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,property_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn PortfolioStore> = match &config.backend {
        StoreBackend::Rest { base_url, api_key } => {
            tracing::info!(base_url = %base_url, "Using hosted REST store");
            Arc::new(RestStore::new(
                base_url.clone(),
                api_key.clone(),
                config.http_timeout,
            )?)
        }
        StoreBackend::Postgres {
            database_url,
            run_migrations,
        } => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url.as_str()).await?;

            if *run_migrations {
                tracing::info!("Running migrations...");
                migration::Migrator::up(&db, None).await?;
            }

            Arc::new(PostgresStore::new(db))
        }
    };

    tracing::info!(
        store = store.name(),
        cache_ttl_secs = config.snapshot_cache_ttl.as_secs(),
        income_category = %config.dashboard.income_category,
        "Portfolio store ready"
    );

    let state = AppState {
        snapshots: SnapshotService::new(store, config.snapshot_cache_ttl),
        settings: Arc::new(config.dashboard),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server gracefully");
}
