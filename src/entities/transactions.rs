//! SeaORM Entity for the operating ledger (rent in, running costs out)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_date")]
    pub date: Option<Date>,
    /// Property address the line belongs to
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub property: Option<String>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub description: Option<String>,
    /// Category / type tag, e.g. "Rental Income", "Repairs"
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub category: Option<String>,
    /// Signed: income positive, expenses negative
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub amount: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
