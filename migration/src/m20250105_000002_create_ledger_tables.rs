use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Operating ledger: rent in, running costs out
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Date).date().null())
                    .col(ColumnDef::new(Transactions::Property).string().null())
                    .col(ColumnDef::new(Transactions::Description).text().null())
                    .col(ColumnDef::new(Transactions::Category).string().null())
                    .col(ColumnDef::new(Transactions::Amount).decimal_len(14, 2).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_date")
                    .table(Transactions::Table)
                    .col((Transactions::Date, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        // External valuation data points, keyed by address
        manager
            .create_table(
                Table::create()
                    .table(Valuations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Valuations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Valuations::Address).string().null())
                    .col(ColumnDef::new(Valuations::Date).date().null())
                    .col(ColumnDef::new(Valuations::Value).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Valuations::Source).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_valuations_address_date")
                    .table(Valuations::Table)
                    .col(Valuations::Address)
                    .col(Valuations::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Valuations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Date,
    Property,
    Description,
    Category,
    Amount,
}

#[derive(Iden)]
enum Valuations {
    Table,
    Id,
    Address,
    Date,
    Value,
    Source,
}
