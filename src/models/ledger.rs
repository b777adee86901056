//! Ledger request/response models
//!
//! Models for GET /api/transactions and the filter query shared with the
//! summary endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::dashboard::Tone;
use crate::models::error::QueryError;
use crate::models::records::Transaction;
use crate::services::aggregation::IncomeSummary;
use crate::services::formatting::{format_currency, format_date};
use crate::services::ledger::{
    FilterOptions, LedgerColumn, LedgerFilter, SortDirection, SortSpec,
};

/// Separates values of a multi-select parameter. Addresses contain commas.
pub const MULTI_SELECT_SEPARATOR: char = '|';

/// Query parameters for the ledger and summary endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerQuery {
    /// Inclusive start date, YYYY-MM-DD
    pub start: Option<String>,
    /// Inclusive end date, YYYY-MM-DD
    pub end: Option<String>,
    pub property: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// date, property, description, category, amount (default: date)
    pub sort: Option<String>,
    /// asc, desc (default: desc)
    pub direction: Option<String>,
}

impl LedgerQuery {
    pub fn filter(&self) -> Result<LedgerFilter, QueryError> {
        let start = parse_date_param("start", self.start.as_deref())?;
        let end = parse_date_param("end", self.end.as_deref())?;

        Ok(LedgerFilter::new(start, end)
            .select(LedgerColumn::Property, split_values(self.property.as_deref()))
            .select(LedgerColumn::Category, split_values(self.category.as_deref()))
            .select(
                LedgerColumn::Description,
                split_values(self.description.as_deref()),
            ))
    }

    pub fn sort_spec(&self) -> Result<SortSpec, QueryError> {
        let defaults = SortSpec::default();

        let column = match non_blank(self.sort.as_deref()) {
            None => defaults.column,
            Some(raw) => LedgerColumn::from_str(raw).ok_or_else(|| QueryError {
                code: "INVALID_SORT",
                message: format!(
                    "Invalid sort: '{}'. Must be one of: date, property, description, category, amount",
                    raw
                ),
            })?,
        };

        let direction = match non_blank(self.direction.as_deref()) {
            None => defaults.direction,
            Some(raw) => SortDirection::from_str(raw).ok_or_else(|| QueryError {
                code: "INVALID_DIRECTION",
                message: format!("Invalid direction: '{}'. Must be asc or desc", raw),
            })?,
        };

        Ok(SortSpec { column, direction })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date_param(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, QueryError> {
    match non_blank(raw) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| QueryError {
                code: "INVALID_DATE",
                message: format!("Invalid {}: '{}'. Expected YYYY-MM-DD", name, text),
            }),
    }
}

fn split_values(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(MULTI_SELECT_SEPARATOR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// One ledger table row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub id: i64,
    pub date: NaiveDate,
    pub date_display: String,
    pub property: String,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub amount_display: String,
    pub tone: Tone,
}

impl LedgerRow {
    pub fn from_transaction(tx: Transaction, currency_symbol: &str) -> Self {
        Self {
            id: tx.id,
            date: tx.date,
            date_display: format_date(tx.date),
            amount_display: format_currency(tx.amount, currency_symbol),
            tone: Tone::of(tx.amount),
            property: tx.property,
            description: tx.description,
            category: tx.category,
            amount: tx.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub rows: Vec<LedgerRow>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub summary: IncomeSummary,
    /// Dropdown values, computed from the unfiltered ledger
    pub options: FilterOptions,
    pub sort: SortSpec,
    pub fetched_at: DateTime<Utc>,
}
