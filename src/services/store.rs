//! Portfolio data source abstraction
//!
//! The dashboard reads five tables and never writes. A store hands back raw
//! entity rows; validation into domain records happens in `snapshot`.

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::entities::{capital_transactions, properties_master, scenarios, transactions, valuations};

/// Table names shared by both backends and the migrations
pub mod tables {
    pub const TRANSACTIONS: &str = "transactions";
    pub const PROPERTIES_MASTER: &str = "properties_master";
    pub const CAPITAL_TRANSACTIONS: &str = "capital_transactions";
    pub const SCENARIOS: &str = "scenarios";
    pub const VALUATIONS: &str = "valuations";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{table}: store responded {status}: {body}")]
    Status {
        table: &'static str,
        status: u16,
        body: String,
    },

    #[error("{table}: malformed rows: {source}")]
    Decode {
        table: &'static str,
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Short backend name for logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn transactions(&self) -> Result<Vec<transactions::Model>, StoreError>;

    async fn properties(&self) -> Result<Vec<properties_master::Model>, StoreError>;

    async fn capital_transactions(&self) -> Result<Vec<capital_transactions::Model>, StoreError>;

    async fn scenarios(&self) -> Result<Vec<scenarios::Model>, StoreError>;

    async fn valuations(&self) -> Result<Vec<valuations::Model>, StoreError>;
}
