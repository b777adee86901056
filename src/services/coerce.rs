//! Lenient field decoding for rows coming back from the hosted store.
//!
//! The REST interface hands back whatever the column holds: numbers may be
//! JSON numbers or text ("1,250.00", "£950"), dates may carry a time part,
//! and blanks show up as `""` or `null`. Everything here maps unusable input
//! to `None` so the record layer can coerce it to zero instead of failing the
//! whole collection.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

const CURRENCY_MARKS: &[char] = &['£', '$', '€', ','];

pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(decimal_from_value))
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => parse_date_text(&text),
        _ => None,
    })
}

pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => Some(text.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Decimal from a JSON number or numeric text; `None` for anything else.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_text(&n.to_string()),
        Value::String(text) => parse_decimal_text(text),
        _ => None,
    }
}

/// Parse "1,250.50", "£950", "(120.00)" and plain/scientific numbers.
pub fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !CURRENCY_MARKS.contains(c) && !c.is_whitespace())
        .collect();
    // "-£950" leaves "-950"; "£-950" also ends up as "-950"
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    let parsed = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;

    Some(if negative { -parsed } else { parsed })
}

/// Accepts `YYYY-MM-DD`, an ISO timestamp, or `DD/MM/YYYY`.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts.date());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}
