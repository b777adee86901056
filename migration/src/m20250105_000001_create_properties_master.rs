use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertiesMaster::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertiesMaster::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertiesMaster::PropertyCode).string().null())
                    .col(ColumnDef::new(PropertiesMaster::Address).string().null())
                    .col(ColumnDef::new(PropertiesMaster::City).string().null())
                    .col(ColumnDef::new(PropertiesMaster::PurchaseDate).date().null())
                    .col(money(PropertiesMaster::PurchasePrice))
                    .col(money(PropertiesMaster::AcquisitionCosts))
                    .col(money(PropertiesMaster::RenovationCost))
                    .col(money(PropertiesMaster::Phase1Mortgage))
                    .col(rate(PropertiesMaster::Phase1Rate))
                    .col(ColumnDef::new(PropertiesMaster::RefinanceDate).date().null())
                    .col(money(PropertiesMaster::RefinanceValue))
                    .col(money(PropertiesMaster::Phase2Mortgage))
                    .col(rate(PropertiesMaster::Phase2Rate))
                    .col(money(PropertiesMaster::Phase2MonthlyRent))
                    .col(money(PropertiesMaster::Phase2MonthlyCosts))
                    .col(money(PropertiesMaster::MarketValue))
                    .col(ColumnDef::new(PropertiesMaster::ListingUrl).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_master_address")
                    .table(PropertiesMaster::Table)
                    .col(PropertiesMaster::Address)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertiesMaster::Table).to_owned())
            .await
    }
}

fn money(col: PropertiesMaster) -> ColumnDef {
    ColumnDef::new(col).decimal_len(14, 2).null().to_owned()
}

fn rate(col: PropertiesMaster) -> ColumnDef {
    ColumnDef::new(col).decimal_len(6, 3).null().to_owned()
}

#[derive(Iden)]
enum PropertiesMaster {
    Table,
    Id,
    PropertyCode,
    Address,
    City,
    PurchaseDate,
    PurchasePrice,
    AcquisitionCosts,
    RenovationCost,
    #[iden = "phase1_mortgage"]
    Phase1Mortgage,
    #[iden = "phase1_rate"]
    Phase1Rate,
    RefinanceDate,
    RefinanceValue,
    #[iden = "phase2_mortgage"]
    Phase2Mortgage,
    #[iden = "phase2_rate"]
    Phase2Rate,
    #[iden = "phase2_monthly_rent"]
    Phase2MonthlyRent,
    #[iden = "phase2_monthly_costs"]
    Phase2MonthlyCosts,
    MarketValue,
    ListingUrl,
}
