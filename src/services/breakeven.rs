//! Capital-recovery (breakeven) estimation
//!
//! Given a property's known value milestones in date order and a target
//! (purchase baseline + net cash invested), find the instant at which value
//! reaches the target: read it off the known points when it is already
//! bracketed, otherwise project it along the first-to-last trend.
//!
//! Everything is computed on millisecond timestamps so a projected instant
//! fed back in as a known point reproduces itself.

use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Projections further out than this many years are not reported
pub const DEFAULT_HORIZON_YEARS: u32 = 25;

/// Length of the trend extension drawn past the projected breakeven
pub const DEFAULT_EXTENSION_YEARS: u32 = 2;

pub const PROJECTED_LABEL: &str = "Capital recovered (projected)";
pub const EXTENSION_LABEL: &str = "Trend extension";

const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakevenConfig {
    pub horizon_years: u32,
    pub extension_years: u32,
}

impl Default for BreakevenConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            extension_years: DEFAULT_EXTENSION_YEARS,
        }
    }
}

/// A valuation milestone on the appreciation timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    pub date: DateTime<Utc>,
    pub value: Decimal,
    pub label: String,
}

impl ValuePoint {
    pub fn new(date: DateTime<Utc>, value: Decimal, label: impl Into<String>) -> Self {
        Self {
            date,
            value,
            label: label.into(),
        }
    }

    /// Point at midnight UTC of a calendar date
    pub fn on_day(date: NaiveDate, value: Decimal, label: impl Into<String>) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc(), value, label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Breakeven {
    /// The first known point already meets the target
    #[serde(rename_all = "camelCase")]
    AlreadyAchieved { index: usize, date: DateTime<Utc> },
    /// Target lies between known points `index` and `index + 1`
    #[serde(rename_all = "camelCase")]
    Interpolated {
        index: usize,
        fraction: Decimal,
        date: DateTime<Utc>,
    },
    /// Target reached only by extending the first-to-last trend
    #[serde(rename_all = "camelCase")]
    Projected {
        date: DateTime<Utc>,
        daily_rate: Decimal,
        points: Vec<ValuePoint>,
    },
    Undetermined,
}

impl Breakeven {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Breakeven::AlreadyAchieved { date, .. }
            | Breakeven::Interpolated { date, .. }
            | Breakeven::Projected { date, .. } => Some(*date),
            Breakeven::Undetermined => None,
        }
    }

    pub fn is_projected(&self) -> bool {
        matches!(self, Breakeven::Projected { .. })
    }

    /// Position along the known points, e.g. `1.25` is a quarter of the way
    /// from point 1 to point 2.
    pub fn fractional_index(&self) -> Option<Decimal> {
        match self {
            Breakeven::AlreadyAchieved { index, .. } => Some(Decimal::from(*index)),
            Breakeven::Interpolated {
                index, fraction, ..
            } => Some(Decimal::from(*index) + fraction),
            _ => None,
        }
    }

    /// Extrapolated points to append to the chart series
    pub fn projected_points(&self) -> &[ValuePoint] {
        match self {
            Breakeven::Projected { points, .. } => points,
            _ => &[],
        }
    }
}

/// Find or project the date at which `points` reach `target`.
///
/// `points` must be ascending by date.
pub fn estimate_breakeven(
    points: &[ValuePoint],
    target: Decimal,
    config: &BreakevenConfig,
) -> Breakeven {
    let Some(first) = points.first() else {
        return Breakeven::Undetermined;
    };

    if first.value >= target {
        return Breakeven::AlreadyAchieved {
            index: 0,
            date: first.date,
        };
    }

    if let Some(found) = interpolate(points, target) {
        return found;
    }

    extrapolate(points, target, config).unwrap_or(Breakeven::Undetermined)
}

fn interpolate(points: &[ValuePoint], target: Decimal) -> Option<Breakeven> {
    points.windows(2).enumerate().find_map(|(index, pair)| {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.value == lower.value || !(lower.value < target && target <= upper.value) {
            return None;
        }

        let fraction = (target - lower.value).checked_div(upper.value - lower.value)?;
        let date = offset_by_fraction(lower.date, upper.date, fraction)?;

        Some(Breakeven::Interpolated {
            index,
            fraction,
            date,
        })
    })
}

fn extrapolate(
    points: &[ValuePoint],
    target: Decimal,
    config: &BreakevenConfig,
) -> Option<Breakeven> {
    if points.len() < 2 {
        return None;
    }

    let first = points.first()?;
    let last = points.last()?;
    let first_ms = first.date.timestamp_millis();
    let last_ms = last.date.timestamp_millis();

    if last_ms <= first_ms || last.value <= first.value {
        return None;
    }

    let rate = (last.value - first.value).checked_div(Decimal::from(last_ms - first_ms))?;
    let remaining_ms = (target - last.value).checked_div(rate)?.round().to_i64()?;
    if remaining_ms <= 0 {
        return None;
    }

    let date = DateTime::from_timestamp_millis(last_ms.checked_add(remaining_ms)?)?;
    let horizon = last
        .date
        .checked_add_months(Months::new(config.horizon_years.checked_mul(12)?))?;
    if date >= horizon {
        return None;
    }

    let mut projected = vec![ValuePoint::new(date, target, PROJECTED_LABEL)];
    if config.extension_years > 0 {
        if let Some(beyond) = extension_point(date, target, rate, config.extension_years) {
            projected.push(beyond);
        }
    }

    Some(Breakeven::Projected {
        date,
        daily_rate: rate.checked_mul(Decimal::from(MS_PER_DAY))?,
        points: projected,
    })
}

/// Point `years` calendar years past the breakeven, continuing the same rate
fn extension_point(
    from: DateTime<Utc>,
    target: Decimal,
    rate: Decimal,
    years: u32,
) -> Option<ValuePoint> {
    let date = from.checked_add_months(Months::new(years.checked_mul(12)?))?;
    let span_ms = (date - from).num_milliseconds();
    let value = target.checked_add(rate.checked_mul(Decimal::from(span_ms))?)?;
    Some(ValuePoint::new(date, value, EXTENSION_LABEL))
}

fn offset_by_fraction(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    fraction: Decimal,
) -> Option<DateTime<Utc>> {
    let start_ms = start.timestamp_millis();
    let span_ms = end.timestamp_millis() - start_ms;
    let offset_ms = fraction
        .checked_mul(Decimal::from(span_ms))?
        .round()
        .to_i64()?;
    DateTime::from_timestamp_millis(start_ms.checked_add(offset_ms)?)
}
