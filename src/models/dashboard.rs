//! Summary dashboard response models
//!
//! Models for GET /api/dashboard/summary: color-coded KPI cards plus the
//! breakdown tables and pie chart data behind them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::services::aggregation::{GroupTotal, IncomeSummary, PieSlice};
use crate::services::formatting::{format_currency, format_percentage};

/// Card coloring hint for the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Tone::Positive
        } else if value < Decimal::ZERO {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub key: String,
    pub title: String,
    pub value: Decimal,
    pub display: String,
    pub tone: Tone,
}

impl KpiCard {
    pub fn currency(key: &str, title: &str, value: Decimal, symbol: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            value,
            display: format_currency(value, symbol),
            tone: Tone::of(value),
        }
    }

    pub fn percentage(key: &str, title: &str, value: Option<Decimal>) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            value: value.unwrap_or(Decimal::ZERO),
            display: value.map(format_percentage).unwrap_or_else(|| "n/a".to_string()),
            tone: value.map(Tone::of).unwrap_or(Tone::Neutral),
        }
    }
}

/// Income / expenses / net cards in display order
pub fn income_cards(summary: &IncomeSummary, symbol: &str) -> Vec<KpiCard> {
    vec![
        KpiCard::currency("income", "Total Income", summary.income, symbol),
        KpiCard::currency("expenses", "Total Expenses", summary.expenses, symbol),
        KpiCard::currency("net", "Net Income", summary.net, symbol),
    ]
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    pub cards: Vec<KpiCard>,
    pub summary: IncomeSummary,
    pub categories: Vec<GroupTotal>,
    pub properties: Vec<GroupTotal>,
    pub expense_pie: Vec<PieSlice>,
    pub filters_active: bool,
    pub fetched_at: DateTime<Utc>,
}
