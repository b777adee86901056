pub use sea_orm_migration::prelude::*;

mod m20250105_000001_create_properties_master;
mod m20250105_000002_create_ledger_tables;
mod m20250105_000003_create_capital_and_scenarios;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250105_000001_create_properties_master::Migration),
            Box::new(m20250105_000002_create_ledger_tables::Migration),
            Box::new(m20250105_000003_create_capital_and_scenarios::Migration),
        ]
    }
}
