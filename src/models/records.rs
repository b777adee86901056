//! Typed portfolio records
//!
//! Rows are validated once, at the fetch boundary: numeric gaps become zero,
//! text is trimmed, and rows that are meaningless without a date are dropped.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::entities::{capital_transactions, properties_master, scenarios, transactions, valuations};

fn text(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn amount(raw: Option<Decimal>) -> Decimal {
    raw.unwrap_or(Decimal::ZERO)
}

/// Ledger line. `amount` is positive for income and negative for expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub property: String,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
}

impl Transaction {
    /// `None` when the row has no usable date.
    pub fn from_row(row: transactions::Model) -> Option<Self> {
        Some(Self {
            id: row.id,
            date: row.date?,
            property: text(row.property),
            description: text(row.description),
            category: text(row.category),
            amount: amount(row.amount),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub code: String,
    pub address: String,
    pub city: String,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Decimal,
    pub acquisition_costs: Decimal,
    pub renovation_cost: Decimal,
    pub phase1_mortgage: Decimal,
    pub phase1_rate: Decimal,
    pub refinance_date: Option<NaiveDate>,
    pub refinance_value: Decimal,
    pub phase2_mortgage: Decimal,
    pub phase2_rate: Decimal,
    pub phase2_monthly_rent: Decimal,
    pub phase2_monthly_costs: Decimal,
    pub market_value: Decimal,
    pub listing_url: Option<String>,
}

impl From<properties_master::Model> for Property {
    fn from(row: properties_master::Model) -> Self {
        Self {
            id: row.id,
            code: text(row.property_code),
            address: text(row.address),
            city: text(row.city),
            purchase_date: row.purchase_date,
            purchase_price: amount(row.purchase_price),
            acquisition_costs: amount(row.acquisition_costs),
            renovation_cost: amount(row.renovation_cost),
            phase1_mortgage: amount(row.phase1_mortgage),
            phase1_rate: amount(row.phase1_rate),
            refinance_date: row.refinance_date,
            refinance_value: amount(row.refinance_value),
            phase2_mortgage: amount(row.phase2_mortgage),
            phase2_rate: amount(row.phase2_rate),
            phase2_monthly_rent: amount(row.phase2_monthly_rent),
            phase2_monthly_costs: amount(row.phase2_monthly_costs),
            market_value: amount(row.market_value),
            listing_url: row
                .listing_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Capital event type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapitalEventKind {
    Purchase,
    AcquisitionCosts,
    Renovation,
    Refinance,
    Other(String),
}

impl CapitalEventKind {
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "purchase" | "deposit" => CapitalEventKind::Purchase,
            "acquisition_costs" | "acquisition" | "fees" | "stamp_duty" | "legal" => {
                CapitalEventKind::AcquisitionCosts
            }
            "renovation" | "refurbishment" | "works" => CapitalEventKind::Renovation,
            "refinance" | "remortgage" | "equity_release" => CapitalEventKind::Refinance,
            _ => CapitalEventKind::Other(tag.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CapitalEventKind::Purchase => "purchase",
            CapitalEventKind::AcquisitionCosts => "acquisition_costs",
            CapitalEventKind::Renovation => "renovation",
            CapitalEventKind::Refinance => "refinance",
            CapitalEventKind::Other(tag) => tag,
        }
    }
}

impl Serialize for CapitalEventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalTransaction {
    pub id: i64,
    pub property_id: i64,
    pub date: Option<NaiveDate>,
    pub kind: CapitalEventKind,
    pub description: String,
    pub amount: Decimal,
}

impl CapitalTransaction {
    /// `None` when the row is not attached to a property.
    pub fn from_row(row: capital_transactions::Model) -> Option<Self> {
        Some(Self {
            id: row.id,
            property_id: row.property_id?,
            date: row.date,
            kind: CapitalEventKind::from_tag(row.transaction_type.as_deref().unwrap_or("")),
            description: text(row.description),
            amount: amount(row.amount),
        })
    }
}

/// What-if assumptions. Zero fields mean "keep the base case figure".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
    pub revaluation: Decimal,
    pub equity_release: Decimal,
    pub mortgage_rate: Decimal,
    pub monthly_rent: Decimal,
}

impl Scenario {
    pub fn from_row(row: scenarios::Model) -> Option<Self> {
        let name = text(row.name);
        Some(Self {
            id: row.id,
            property_id: row.property_id?,
            name: if name.is_empty() {
                format!("Scenario {}", row.id)
            } else {
                name
            },
            revaluation: amount(row.revaluation),
            equity_release: amount(row.equity_release),
            mortgage_rate: amount(row.mortgage_rate),
            monthly_rent: amount(row.monthly_rent),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub id: i64,
    pub address: String,
    pub date: NaiveDate,
    pub value: Decimal,
    pub source: String,
}

impl Valuation {
    /// `None` when the row has no usable date.
    pub fn from_row(row: valuations::Model) -> Option<Self> {
        Some(Self {
            id: row.id,
            address: text(row.address),
            date: row.date?,
            value: amount(row.value),
            source: text(row.source),
        })
    }
}

/// Address comparison used to join ledger/valuation rows to a property.
pub fn same_address(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
