//! Parsing helpers shared by the DB models.
//!
//! Amounts and dates persist as `Text`; loading is tolerant so one corrupt
//! row degrades to a logged fallback instead of poisoning a whole listing.

use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// RFC3339 timestamp for audit columns.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parses a stored amount, falling back through f64 for scientific notation.
pub fn parse_decimal(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as Decimal ({}). Falling back to ZERO.",
                    field_name,
                    value_str,
                    e_decimal
                );
                Decimal::ZERO
            }
        },
    }
}

/// Parses a stored `YYYY-MM-DD` date.
pub fn parse_date(value_str: &str, field_name: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(value_str, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as date ({}). Falling back to epoch.",
                field_name,
                value_str,
                e
            );
            NaiveDate::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1234.56", "amount"), dec!(1234.56));
        assert_eq!(parse_decimal("1e2", "amount"), dec!(100));
        assert_eq!(parse_decimal("garbage", "amount"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-05", "date"),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert_eq!(parse_date("not-a-date", "date"), NaiveDate::default());
    }
}
