//! Display formatting for cards and tables

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// `-£1,234.50` style, two decimals, thousands grouped.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}{symbol}{}.{fraction}", group_thousands(whole))
}

/// One decimal place, e.g. `7.4%`
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// `5 Mar 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// `Mar 2024`, used for projected instants where the day is noise
pub fn format_month(instant: DateTime<Utc>) -> String {
    instant.format("%b %Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0), "£"), "£0.00");
        assert_eq!(format_currency(dec!(950), "£"), "£950.00");
        assert_eq!(format_currency(dec!(1234.5), "£"), "£1,234.50");
        assert_eq!(format_currency(dec!(-1234567.891), "£"), "-£1,234,567.89");
        assert_eq!(format_currency(dec!(100000), "$"), "$100,000.00");
    }

    #[test]
    fn test_format_currency_tiny_negative_rounds_to_zero() {
        assert_eq!(format_currency(dec!(-0.001), "£"), "£0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(7.44)), "7.4%");
        assert_eq!(format_percentage(dec!(-3)), "-3.0%");
        assert_eq!(format_percentage(dec!(100)), "100.0%");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "5 Mar 2024");
    }

    #[test]
    fn test_format_month() {
        let instant = NaiveDate::from_ymd_opt(2027, 11, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(format_month(instant), "Nov 2027");
    }
}
