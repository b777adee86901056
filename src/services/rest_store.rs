//! Hosted store accessed over its PostgREST interface
//!
//! `GET {base}/rest/v1/{table}?select=*` with the project API key sent both
//! as `apikey` and as a bearer token.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::entities::{capital_transactions, properties_master, scenarios, transactions, valuations};
use crate::services::store::{tables, PortfolioStore, StoreError};

#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn fetch_table<T: DeserializeOwned>(&self, table: &'static str) -> Result<Vec<T>, StoreError> {
        let started = std::time::Instant::now();

        let response = self
            .client
            .get(self.table_url(table))
            .header("accept", "application/json")
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { table, status, body });
        }

        let body = response.bytes().await?;
        let raw: Vec<Value> =
            serde_json::from_slice(&body).map_err(|source| StoreError::Decode { table, source })?;
        let rows: Vec<T> = decode_rows(table, raw);

        tracing::debug!(
            table,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched table"
        );

        Ok(rows)
    }
}

/// Decode each row on its own; rows that do not fit the entity are skipped.
pub(crate) fn decode_rows<T: DeserializeOwned>(table: &'static str, raw: Vec<Value>) -> Vec<T> {
    let total = raw.len();
    let rows: Vec<T> = raw
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(table, error = %e, "Undecodable row");
                None
            }
        })
        .collect();

    let dropped = total - rows.len();
    if dropped > 0 {
        tracing::warn!(table, dropped, "Skipped rows that could not be decoded");
    }
    rows
}

#[async_trait]
impl PortfolioStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn transactions(&self) -> Result<Vec<transactions::Model>, StoreError> {
        self.fetch_table(tables::TRANSACTIONS).await
    }

    async fn properties(&self) -> Result<Vec<properties_master::Model>, StoreError> {
        self.fetch_table(tables::PROPERTIES_MASTER).await
    }

    async fn capital_transactions(&self) -> Result<Vec<capital_transactions::Model>, StoreError> {
        self.fetch_table(tables::CAPITAL_TRANSACTIONS).await
    }

    async fn scenarios(&self) -> Result<Vec<scenarios::Model>, StoreError> {
        self.fetch_table(tables::SCENARIOS).await
    }

    async fn valuations(&self) -> Result<Vec<valuations::Model>, StoreError> {
        self.fetch_table(tables::VALUATIONS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = RestStore::new(
            "https://abc.supabase.co/".to_string(),
            "key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            store.table_url(tables::PROPERTIES_MASTER),
            "https://abc.supabase.co/rest/v1/properties_master"
        );
        assert_eq!(store.name(), "rest");
    }

    #[test]
    fn test_bad_row_skipped_without_losing_table() {
        let raw: Vec<Value> = serde_json::from_str(
            r#"[
                {"id": 1, "date": "2024-01-03", "property": "12 Mill Lane", "category": "Rental Income", "amount": "1,350.00"},
                {"id": null, "date": "2024-01-04", "property": "12 Mill Lane", "amount": -10},
                {"id": "abc", "date": "2024-01-05"},
                {"id": 4, "date": "2024-01-06", "property": "4 Canal St", "amount": -240.5}
            ]"#,
        )
        .unwrap();

        let rows: Vec<transactions::Model> = decode_rows(tables::TRANSACTIONS, raw);

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(rows[0].amount, Some(rust_decimal_macros::dec!(1350)));
    }

    #[test]
    fn test_decode_error_names_table() {
        let source = serde_json::from_str::<Vec<transactions::Model>>("{\"oops\": 1}").unwrap_err();
        let err = StoreError::Decode {
            table: tables::TRANSACTIONS,
            source,
        };
        assert!(err.to_string().starts_with("transactions: malformed rows"));
    }
}
