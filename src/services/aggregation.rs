//! Ledger and capital aggregation
//!
//! Pure functions over already-fetched records. Expenses are stored as
//! negative amounts, so totals are plain sums and `net = income + expenses`.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::records::{CapitalTransaction, Transaction};

/// Headline figures for the summary cards
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub transaction_count: usize,
}

/// One row of a breakdown table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotal {
    pub key: String,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub label: String,
    pub value: Decimal,
    pub share_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalSummary {
    pub by_kind: Vec<GroupTotal>,
    /// Cash put in (purchase, fees, works) as a positive figure
    pub cash_deployed: Decimal,
    /// Cash taken back out, e.g. refinance equity release
    pub equity_extracted: Decimal,
    pub net_cash_invested: Decimal,
    pub event_count: usize,
}

/// Income is whatever sits in the designated income category; every other
/// category counts as expense.
pub fn summarize<'a, I>(records: I, income_category: &str) -> IncomeSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let income_category = income_category.trim();
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut transaction_count = 0;

    for record in records {
        if record.category == income_category {
            income += record.amount;
        } else {
            expenses += record.amount;
        }
        transaction_count += 1;
    }

    IncomeSummary {
        income,
        expenses,
        net: income + expenses,
        transaction_count,
    }
}

/// Group by `key`, sum amounts, largest total first.
///
/// Ties keep alphabetical key order.
pub fn breakdown_by<'a, I, F>(records: I, key: F) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> &str,
{
    let mut groups: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry(key(record).to_string())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    let mut rows: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(key, (total, count))| GroupTotal { key, total, count })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

pub fn breakdown_by_category<'a, I>(records: I) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    breakdown_by(records, |r| r.category.as_str())
}

pub fn breakdown_by_property<'a, I>(records: I) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    breakdown_by(records, |r| r.property.as_str())
}

/// Expense categories as pie slices (magnitudes), largest first.
pub fn expense_pie(breakdown: &[GroupTotal]) -> Vec<PieSlice> {
    let mut expenses: Vec<(&str, Decimal)> = breakdown
        .iter()
        .filter(|row| row.total < Decimal::ZERO)
        .map(|row| (row.key.as_str(), -row.total))
        .collect();
    expenses.sort_by(|a, b| b.1.cmp(&a.1));

    let total: Decimal = expenses.iter().map(|(_, value)| *value).sum();
    if total.is_zero() {
        return Vec::new();
    }

    expenses
        .into_iter()
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
            share_pct: (value / total * Decimal::ONE_HUNDRED).round_dp(2),
        })
        .collect()
}

pub fn summarize_capital<'a, I>(events: I) -> CapitalSummary
where
    I: IntoIterator<Item = &'a CapitalTransaction>,
{
    let mut kinds: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    let mut cash_deployed = Decimal::ZERO;
    let mut equity_extracted = Decimal::ZERO;
    let mut event_count = 0;

    for event in events {
        let entry = kinds
            .entry(event.kind.as_str().to_string())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += event.amount;
        entry.1 += 1;

        if event.amount < Decimal::ZERO {
            cash_deployed -= event.amount;
        } else {
            equity_extracted += event.amount;
        }
        event_count += 1;
    }

    let mut by_kind: Vec<GroupTotal> = kinds
        .into_iter()
        .map(|(key, (total, count))| GroupTotal { key, total, count })
        .collect();
    // Biggest outlay first
    by_kind.sort_by(|a, b| a.total.cmp(&b.total));

    CapitalSummary {
        by_kind,
        cash_deployed,
        equity_extracted,
        net_cash_invested: cash_deployed - equity_extracted,
        event_count,
    }
}
