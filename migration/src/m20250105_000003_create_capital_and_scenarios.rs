use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CapitalTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CapitalTransactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CapitalTransactions::PropertyId).big_integer().null())
                    .col(ColumnDef::new(CapitalTransactions::Date).date().null())
                    .col(ColumnDef::new(CapitalTransactions::TransactionType).string().null())
                    .col(ColumnDef::new(CapitalTransactions::Description).text().null())
                    .col(
                        ColumnDef::new(CapitalTransactions::Amount)
                            .decimal_len(14, 2)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_capital_transactions_property")
                    .table(CapitalTransactions::Table)
                    .col(CapitalTransactions::PropertyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Scenarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scenarios::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scenarios::PropertyId).big_integer().null())
                    .col(ColumnDef::new(Scenarios::Name).string().null())
                    .col(ColumnDef::new(Scenarios::Revaluation).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Scenarios::EquityRelease).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Scenarios::MortgageRate).decimal_len(6, 3).null())
                    .col(ColumnDef::new(Scenarios::MonthlyRent).decimal_len(14, 2).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scenarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CapitalTransactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CapitalTransactions {
    Table,
    Id,
    PropertyId,
    Date,
    TransactionType,
    Description,
    Amount,
}

#[derive(Iden)]
enum Scenarios {
    Table,
    Id,
    PropertyId,
    Name,
    Revaluation,
    EquityRelease,
    MortgageRate,
    MonthlyRent,
}
