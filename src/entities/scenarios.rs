//! SeaORM Entity for what-if assumption sets

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scenarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_i64")]
    pub property_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub revaluation: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub equity_release: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 3)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub mortgage_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub monthly_rent: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
