//! SeaORM Entity for externally recorded valuation data points

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "valuations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_date")]
    pub date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub value: Option<Decimal>,
    /// Where the figure came from (surveyor, portal estimate, ...)
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub source: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
