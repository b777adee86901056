//! Portfolio snapshot loading and caching
//!
//! All five tables are fetched concurrently. A table that fails to load is
//! logged and treated as empty so the rest of the dashboard still renders;
//! such a partial snapshot is never cached.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::records::{CapitalTransaction, Property, Scenario, Transaction, Valuation};
use crate::services::store::{tables, PortfolioStore, StoreError};

#[derive(Debug, Clone)]
pub struct PortfolioSnapshot {
    pub transactions: Vec<Transaction>,
    pub properties: Vec<Property>,
    pub capital_transactions: Vec<CapitalTransaction>,
    pub scenarios: Vec<Scenario>,
    pub valuations: Vec<Valuation>,
    /// Tables that could not be read for this snapshot
    pub failed_tables: Vec<&'static str>,
    pub fetched_at: DateTime<Utc>,
}

impl PortfolioSnapshot {
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            properties: Vec::new(),
            capital_transactions: Vec::new(),
            scenarios: Vec::new(),
            valuations: Vec::new(),
            failed_tables: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    pub fn property(&self, id: i64) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn is_complete(&self) -> bool {
        self.failed_tables.is_empty()
    }
}

fn rows_or_empty<T>(
    table: &'static str,
    result: Result<Vec<T>, StoreError>,
    failed: &mut Vec<&'static str>,
) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(table, error = %e, "Failed to load table, continuing with no rows");
            failed.push(table);
            Vec::new()
        }
    }
}

/// Convert rows, logging how many were unusable
fn convert<R, T>(table: &'static str, rows: Vec<R>, from_row: impl Fn(R) -> Option<T>) -> Vec<T> {
    let total = rows.len();
    let records: Vec<T> = rows.into_iter().filter_map(from_row).collect();

    let dropped = total - records.len();
    if dropped > 0 {
        tracing::warn!(table, dropped, "Skipped rows missing required fields");
    }
    records
}

pub async fn load_snapshot(store: &dyn PortfolioStore) -> PortfolioSnapshot {
    let started = Instant::now();

    let (transactions, properties, capital, scenarios, valuations) = tokio::join!(
        store.transactions(),
        store.properties(),
        store.capital_transactions(),
        store.scenarios(),
        store.valuations(),
    );

    let mut failed_tables = Vec::new();
    let transactions = rows_or_empty(tables::TRANSACTIONS, transactions, &mut failed_tables);
    let properties = rows_or_empty(tables::PROPERTIES_MASTER, properties, &mut failed_tables);
    let capital = rows_or_empty(tables::CAPITAL_TRANSACTIONS, capital, &mut failed_tables);
    let scenarios = rows_or_empty(tables::SCENARIOS, scenarios, &mut failed_tables);
    let valuations = rows_or_empty(tables::VALUATIONS, valuations, &mut failed_tables);

    let snapshot = PortfolioSnapshot {
        transactions: convert(tables::TRANSACTIONS, transactions, Transaction::from_row),
        properties: properties.into_iter().map(Property::from).collect(),
        capital_transactions: convert(tables::CAPITAL_TRANSACTIONS, capital, CapitalTransaction::from_row),
        scenarios: convert(tables::SCENARIOS, scenarios, Scenario::from_row),
        valuations: convert(tables::VALUATIONS, valuations, Valuation::from_row),
        failed_tables,
        fetched_at: Utc::now(),
    };

    tracing::info!(
        store = store.name(),
        transactions = snapshot.transactions.len(),
        properties = snapshot.properties.len(),
        capital_transactions = snapshot.capital_transactions.len(),
        scenarios = snapshot.scenarios.len(),
        valuations = snapshot.valuations.len(),
        failed = snapshot.failed_tables.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded portfolio snapshot"
    );

    snapshot
}

/// Serves snapshots, reusing a complete one until its TTL runs out.
#[derive(Clone)]
pub struct SnapshotService {
    store: Arc<dyn PortfolioStore>,
    cache: Option<Cache<(), Arc<PortfolioSnapshot>>>,
}

impl SnapshotService {
    /// A zero TTL disables caching; every request then reads the store.
    pub fn new(store: Arc<dyn PortfolioStore>, ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });

        Self { store, cache }
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    pub fn caching_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Concurrent callers on a cold cache share a single load.
    pub async fn current(&self) -> Arc<PortfolioSnapshot> {
        let Some(cache) = &self.cache else {
            return Arc::new(load_snapshot(self.store.as_ref()).await);
        };

        let loaded = cache
            .try_get_with((), async {
                let snapshot = Arc::new(load_snapshot(self.store.as_ref()).await);
                if snapshot.is_complete() {
                    Ok(snapshot)
                } else {
                    Err(snapshot)
                }
            })
            .await;

        match loaded {
            Ok(snapshot) => snapshot,
            Err(partial) => {
                tracing::debug!(
                    failed = partial.failed_tables.len(),
                    "Serving partial snapshot without caching it"
                );
                Arc::clone(&*partial)
            }
        }
    }

    /// Drop the cached snapshot so the next read goes to the store.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&()).await;
        }
    }

    /// When the cached snapshot was fetched, if one is held
    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        match &self.cache {
            Some(cache) => cache.get(&()).await.map(|s| s.fetched_at),
            None => None,
        }
    }
}
