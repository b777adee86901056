//! Direct database access through SeaORM

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::prelude::{CapitalTransactions, PropertiesMaster, Scenarios, Transactions, Valuations};
use crate::entities::{capital_transactions, properties_master, scenarios, transactions, valuations};
use crate::services::store::{PortfolioStore, StoreError};

pub struct PostgresStore {
    db: DatabaseConnection,
}

impl PostgresStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PortfolioStore for PostgresStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn transactions(&self) -> Result<Vec<transactions::Model>, StoreError> {
        Ok(Transactions::find()
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn properties(&self) -> Result<Vec<properties_master::Model>, StoreError> {
        Ok(PropertiesMaster::find()
            .order_by_asc(properties_master::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn capital_transactions(&self) -> Result<Vec<capital_transactions::Model>, StoreError> {
        Ok(CapitalTransactions::find()
            .order_by_asc(capital_transactions::Column::Date)
            .order_by_asc(capital_transactions::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn scenarios(&self) -> Result<Vec<scenarios::Model>, StoreError> {
        Ok(Scenarios::find()
            .order_by_asc(scenarios::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn valuations(&self) -> Result<Vec<valuations::Model>, StoreError> {
        Ok(Valuations::find()
            .order_by_asc(valuations::Column::Date)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_transactions_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![transactions::Model {
                id: 7,
                date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
                property: Some("12 Mill Lane".to_string()),
                description: Some("February rent".to_string()),
                category: Some("Rental Income".to_string()),
                amount: Some(dec!(950)),
            }]])
            .into_connection();

        let store = PostgresStore::new(db);
        let rows = store.transactions().await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].amount, Some(dec!(950)));
    }

    #[tokio::test]
    async fn test_database_error_propagates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let store = PostgresStore::new(db);
        let err = store.valuations().await.unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
    }
}
