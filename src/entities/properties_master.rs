//! SeaORM Entity for the property master table
//!
//! One row per property: purchase and financing figures for both phases,
//! the phase-2 operating assumptions and the current market estimate.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties_master")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub property_code: Option<String>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_date")]
    pub purchase_date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub purchase_price: Option<Decimal>,
    /// Stamp duty, legal and broker fees
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub acquisition_costs: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub renovation_cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub phase1_mortgage: Option<Decimal>,
    /// Annual rate in percent
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub phase1_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_date")]
    pub refinance_date: Option<Date>,
    /// Lender revaluation at refinance
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub refinance_value: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub phase2_mortgage: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub phase2_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub phase2_monthly_rent: Option<Decimal>,
    /// Letting agent, insurance, service charge, maintenance reserve
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub phase2_monthly_costs: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub market_value: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub listing_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
