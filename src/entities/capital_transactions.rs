//! SeaORM Entity for one-off capital events (purchase, fees, renovation, refinance)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "capital_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_i64")]
    pub property_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_date")]
    pub date: Option<Date>,
    /// Type tag: purchase, acquisition_costs, renovation, refinance, ...
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_text")]
    pub description: Option<String>,
    /// Cash out negative, cash back (equity release) positive
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    #[serde(default, deserialize_with = "crate::services::coerce::lenient_decimal")]
    pub amount: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
