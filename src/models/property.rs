//! Property panel and portfolio overview response models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::dashboard::KpiCard;
use crate::models::records::{CapitalTransaction, Property};
use crate::services::aggregation::{GroupTotal, IncomeSummary};
use crate::services::breakeven::{Breakeven, ValuePoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: i64,
    pub code: String,
    pub address: String,
    pub city: String,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Decimal,
    pub market_value: Decimal,
    pub listing_url: Option<String>,
}

impl From<&Property> for PropertySummary {
    fn from(p: &Property) -> Self {
        Self {
            id: p.id,
            code: p.code.clone(),
            address: p.address.clone(),
            city: p.city.clone(),
            purchase_date: p.purchase_date,
            purchase_price: p.purchase_price,
            market_value: p.market_value,
            listing_url: p.listing_url.clone(),
        }
    }
}

/// Figures the cash-flow formulas run on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInputs {
    pub market_value: Decimal,
    pub mortgage_balance: Decimal,
    /// Annual rate in percent
    pub mortgage_rate_pct: Decimal,
    pub monthly_rent: Decimal,
    pub monthly_costs: Decimal,
    pub net_cash_invested: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetrics {
    pub monthly_mortgage_payment: Decimal,
    pub monthly_cash_flow: Decimal,
    pub annual_cash_flow: Decimal,
    pub gross_yield_pct: Decimal,
    /// Absent when no cash is left in the deal
    pub cash_on_cash_pct: Option<Decimal>,
    pub equity: Decimal,
    pub loan_to_value_pct: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CapitalSource {
    /// Summed from recorded capital events
    CapitalTransactions,
    /// Derived from the master purchase and refinance figures
    MasterFigures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalPosition {
    pub source: CapitalSource,
    pub cash_deployed: Decimal,
    pub equity_extracted: Decimal,
    pub net_cash_invested: Decimal,
    pub by_kind: Vec<GroupTotal>,
    pub events: Vec<CapitalTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub id: i64,
    pub name: String,
    pub inputs: FinancialInputs,
    pub metrics: PropertyMetrics,
    /// Scenario minus base monthly cash flow
    pub cash_flow_change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppreciationTimeline {
    pub points: Vec<ValuePoint>,
    pub target: Decimal,
    pub breakeven: Breakeven,
    /// Human-readable breakeven line, absent when undetermined
    pub breakeven_label: Option<String>,
    /// Latest known value minus purchase price
    pub gain_to_date: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnalysis {
    pub property: PropertySummary,
    pub cards: Vec<KpiCard>,
    pub capital: CapitalPosition,
    pub inputs: FinancialInputs,
    pub metrics: PropertyMetrics,
    pub scenarios: Vec<ScenarioResult>,
    pub timeline: AppreciationTimeline,
    pub ledger: IncomeSummary,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRow {
    pub property: PropertySummary,
    pub net_cash_invested: Decimal,
    pub metrics: PropertyMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub property_count: usize,
    pub market_value: Decimal,
    pub mortgage_balance: Decimal,
    pub equity: Decimal,
    pub net_cash_invested: Decimal,
    pub monthly_cash_flow: Decimal,
    pub annual_cash_flow: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    pub properties: Vec<PortfolioRow>,
    pub totals: PortfolioTotals,
    pub cards: Vec<KpiCard>,
    pub fetched_at: DateTime<Utc>,
}
