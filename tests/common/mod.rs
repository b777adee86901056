#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DbErr;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use property_dashboard::config::DashboardSettings;
use property_dashboard::entities::{
    capital_transactions, properties_master, scenarios, transactions, valuations,
};
use property_dashboard::services::snapshot::SnapshotService;
use property_dashboard::services::store::{PortfolioStore, StoreError};
use property_dashboard::{build_router, AppState};

pub const MILL_LANE: &str = "12 Mill Lane, Leeds";
pub const CANAL_ST: &str = "4 Canal St, Manchester";

/// In-memory store serving fixed rows
#[derive(Default)]
pub struct StaticStore {
    pub transactions: Vec<transactions::Model>,
    pub properties: Vec<properties_master::Model>,
    pub capital_transactions: Vec<capital_transactions::Model>,
    pub scenarios: Vec<scenarios::Model>,
    pub valuations: Vec<valuations::Model>,
    pub loads: AtomicUsize,
}

impl StaticStore {
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioStore for StaticStore {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn transactions(&self) -> Result<Vec<transactions::Model>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.transactions.clone())
    }

    async fn properties(&self) -> Result<Vec<properties_master::Model>, StoreError> {
        Ok(self.properties.clone())
    }

    async fn capital_transactions(&self) -> Result<Vec<capital_transactions::Model>, StoreError> {
        Ok(self.capital_transactions.clone())
    }

    async fn scenarios(&self) -> Result<Vec<scenarios::Model>, StoreError> {
        Ok(self.scenarios.clone())
    }

    async fn valuations(&self) -> Result<Vec<valuations::Model>, StoreError> {
        Ok(self.valuations.clone())
    }
}

/// Every table fails to load
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(DbErr::Custom("store unavailable".to_string()))
}

#[async_trait]
impl PortfolioStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn transactions(&self) -> Result<Vec<transactions::Model>, StoreError> {
        Err(unavailable())
    }

    async fn properties(&self) -> Result<Vec<properties_master::Model>, StoreError> {
        Err(unavailable())
    }

    async fn capital_transactions(&self) -> Result<Vec<capital_transactions::Model>, StoreError> {
        Err(unavailable())
    }

    async fn scenarios(&self) -> Result<Vec<scenarios::Model>, StoreError> {
        Err(unavailable())
    }

    async fn valuations(&self) -> Result<Vec<valuations::Model>, StoreError> {
        Err(unavailable())
    }
}

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn tx(id: i64, date: Option<NaiveDate>, property: &str, description: &str, category: &str, amount: Decimal) -> transactions::Model {
    transactions::Model {
        id,
        date,
        property: Some(property.to_string()),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        amount: Some(amount),
    }
}

/// Two properties, a quarter of ledger lines, one scenario, one valuation.
pub fn portfolio_store() -> StaticStore {
    StaticStore {
        transactions: vec![
            tx(1, day(2024, 1, 3), MILL_LANE, "January rent", "Rental Income", dec!(1350)),
            tx(2, day(2024, 1, 15), MILL_LANE, "Mortgage interest", "Mortgage", dec!(-600)),
            tx(3, day(2024, 1, 20), CANAL_ST, "January rent", "Rental Income", dec!(900)),
            tx(4, day(2024, 2, 2), CANAL_ST, "Boiler repair", "Repairs", dec!(-240.50)),
            tx(5, day(2024, 2, 3), MILL_LANE, "February rent", "Rental Income", dec!(1350)),
            tx(6, day(2024, 3, 1), CANAL_ST, "Landlord insurance", "Insurance", dec!(-35)),
            // No date: dropped at load
            tx(7, None, CANAL_ST, "Unknown", "Repairs", dec!(-99)),
        ],
        properties: vec![
            properties_master::Model {
                id: 1,
                property_code: Some("ML12".to_string()),
                address: Some(MILL_LANE.to_string()),
                city: Some("Leeds".to_string()),
                purchase_date: day(2021, 3, 1),
                purchase_price: Some(dec!(150000)),
                acquisition_costs: Some(dec!(6200)),
                renovation_cost: Some(dec!(18000)),
                phase1_mortgage: Some(dec!(112500)),
                phase1_rate: Some(dec!(4.5)),
                refinance_date: day(2022, 3, 1),
                refinance_value: Some(dec!(200000)),
                phase2_mortgage: Some(dec!(150000)),
                phase2_rate: Some(dec!(4.8)),
                phase2_monthly_rent: Some(dec!(1350)),
                phase2_monthly_costs: Some(dec!(210)),
                market_value: Some(dec!(210000)),
                listing_url: None,
            },
            properties_master::Model {
                id: 2,
                property_code: Some("CS4".to_string()),
                address: Some(CANAL_ST.to_string()),
                city: Some("Manchester".to_string()),
                purchase_date: day(2022, 6, 1),
                purchase_price: Some(dec!(95000)),
                acquisition_costs: None,
                renovation_cost: None,
                phase1_mortgage: Some(dec!(71250)),
                phase1_rate: Some(dec!(5.2)),
                refinance_date: None,
                refinance_value: None,
                phase2_mortgage: None,
                phase2_rate: None,
                phase2_monthly_rent: Some(dec!(900)),
                phase2_monthly_costs: Some(dec!(150)),
                market_value: Some(dec!(98000)),
                listing_url: Some("https://example.com/listing/cs4".to_string()),
            },
        ],
        capital_transactions: vec![
            capital_transactions::Model {
                id: 1,
                property_id: Some(2),
                date: day(2022, 6, 1),
                transaction_type: Some("Purchase".to_string()),
                description: Some("Deposit".to_string()),
                amount: Some(dec!(-23750)),
            },
            capital_transactions::Model {
                id: 2,
                property_id: Some(2),
                date: day(2022, 6, 1),
                transaction_type: Some("Acquisition Costs".to_string()),
                description: Some("Stamp duty and legal".to_string()),
                amount: Some(dec!(-4100)),
            },
        ],
        scenarios: vec![scenarios::Model {
            id: 1,
            property_id: Some(1),
            name: Some("Rate rise".to_string()),
            revaluation: None,
            equity_release: None,
            mortgage_rate: Some(dec!(6)),
            monthly_rent: None,
        }],
        valuations: vec![valuations::Model {
            id: 1,
            address: Some("12 mill lane, leeds".to_string()),
            date: day(2023, 6, 1),
            value: Some(dec!(205000)),
            source: Some("Zoopla".to_string()),
        }],
        loads: AtomicUsize::new(0),
    }
}

pub fn test_app(store: Arc<dyn PortfolioStore>, cache_ttl: Duration) -> Router {
    let state = AppState {
        snapshots: SnapshotService::new(store, cache_ttl),
        settings: Arc::new(DashboardSettings::default()),
    };
    build_router(state)
}

/// Router over the fixture portfolio with caching disabled
pub fn build_test_router() -> Router {
    test_app(Arc::new(portfolio_store()), Duration::ZERO)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri).await
}

pub fn number(value: &Value) -> f64 {
    value
        .as_f64()
        .unwrap_or_else(|| panic!("expected a number, got {value}"))
}
