//! Ledger filtering and sorting

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::records::Transaction;

/// Ledger table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerColumn {
    Date,
    Property,
    Description,
    Category,
    Amount,
}

impl LedgerColumn {
    pub const FILTERABLE: [LedgerColumn; 3] = [
        LedgerColumn::Property,
        LedgerColumn::Category,
        LedgerColumn::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerColumn::Date => "date",
            LedgerColumn::Property => "property",
            LedgerColumn::Description => "description",
            LedgerColumn::Category => "category",
            LedgerColumn::Amount => "amount",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(LedgerColumn::Date),
            "property" => Some(LedgerColumn::Property),
            "description" => Some(LedgerColumn::Description),
            "category" | "type" => Some(LedgerColumn::Category),
            "amount" => Some(LedgerColumn::Amount),
            _ => None,
        }
    }

    pub fn is_filterable(&self) -> bool {
        Self::FILTERABLE.contains(self)
    }

    fn text<'a>(&self, record: &'a Transaction) -> Option<&'a str> {
        match self {
            LedgerColumn::Property => Some(record.property.as_str()),
            LedgerColumn::Description => Some(record.description.as_str()),
            LedgerColumn::Category => Some(record.category.as_str()),
            LedgerColumn::Date | LedgerColumn::Amount => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub column: LedgerColumn,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest first
    fn default() -> Self {
        Self {
            column: LedgerColumn::Date,
            direction: SortDirection::Desc,
        }
    }
}

/// Active ledger filters. Every set filter must hold for a record to pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    selections: BTreeMap<LedgerColumn, BTreeSet<String>>,
}

impl LedgerFilter {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start,
            end,
            selections: BTreeMap::new(),
        }
    }

    /// Restrict `column` to `values`. An empty selection leaves the column
    /// unfiltered, as does a column that has no multi-select.
    pub fn select<I, S>(mut self, column: LedgerColumn, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !column.is_filterable() {
            return self;
        }

        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            self.selections.remove(&column);
        } else {
            self.selections.insert(column, set);
        }
        self
    }

    pub fn selection(&self, column: LedgerColumn) -> Option<&BTreeSet<String>> {
        self.selections.get(&column)
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some() || !self.selections.is_empty()
    }

    pub fn matches(&self, record: &Transaction) -> bool {
        if self.start.is_some_and(|start| record.date < start) {
            return false;
        }
        if self.end.is_some_and(|end| record.date > end) {
            return false;
        }

        self.selections.iter().all(|(column, allowed)| {
            column
                .text(record)
                .is_some_and(|value| allowed.contains(value))
        })
    }

    pub fn apply<'a, I>(&self, records: I) -> Vec<Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Stable sort; ties keep their incoming order.
pub fn sort_records(records: &mut [Transaction], sort: SortSpec) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, sort.column);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Transaction, b: &Transaction, column: LedgerColumn) -> Ordering {
    match column {
        LedgerColumn::Amount => a.amount.cmp(&b.amount),
        LedgerColumn::Date => a.date.cmp(&b.date),
        LedgerColumn::Property => compare_text(&a.property, &b.property),
        LedgerColumn::Description => compare_text(&a.description, &b.description),
        LedgerColumn::Category => compare_text(&a.category, &b.category),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Dropdown contents for each multi-select column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub properties: Vec<String>,
    pub categories: Vec<String>,
    pub descriptions: Vec<String>,
}

pub fn filter_options<'a, I>(records: I) -> FilterOptions
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut properties = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut descriptions = BTreeSet::new();

    for record in records {
        for (set, value) in [
            (&mut properties, &record.property),
            (&mut categories, &record.category),
            (&mut descriptions, &record.description),
        ] {
            if !value.is_empty() {
                set.insert(value.clone());
            }
        }
    }

    FilterOptions {
        properties: properties.into_iter().collect(),
        categories: categories.into_iter().collect(),
        descriptions: descriptions.into_iter().collect(),
    }
}
