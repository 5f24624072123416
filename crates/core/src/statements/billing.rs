//! Billing-period resolution.

use chrono::{Datelike, NaiveDate};

use crate::errors::{Error, Result, ValidationError};
use crate::statements::statements_model::BillingPeriod;
use crate::utils::{add_months, clamp_day};

/// The date a card's statement closes on in the given month: the closing day
/// clamped to the month's last valid day.
fn closing_date(closing_day: u32, year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, clamp_day(year, month, closing_day)).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "invalid statement month {}-{:02}",
            year, month
        )))
    })
}

/// Resolves the billing period whose closing date falls in `(year, month)`.
///
/// The previous closing is resolved the same way in the previous month, so
/// consecutive periods are always contiguous and never overlap, including
/// when the closing day exceeds a month's length (closing day 31: the
/// January statement ends Jan 31 and the February one runs Feb 1 - Feb 28).
pub fn resolve_period(closing_day: u32, year: i32, month: u32) -> Result<BillingPeriod> {
    let end = closing_date(closing_day, year, month)?;
    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let previous_closing = closing_date(closing_day, prev_year, prev_month)?;
    let start = previous_closing.succ_opt().unwrap_or(previous_closing);
    Ok(BillingPeriod { start, end })
}

/// Resolves the period of the *upcoming* statement relative to `today`.
///
/// This is the only place where "now" meets a closing day: once today is
/// past the card's closing day, the next statement to close is the one in
/// the following month. Historical month queries go through
/// [`resolve_period`] and never consult today's date.
pub fn preview_period(closing_day: u32, today: NaiveDate) -> Result<BillingPeriod> {
    let reference = if today.day() > closing_day {
        add_months(today, 1)
    } else {
        today
    };
    resolve_period(closing_day, reference.year(), reference.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_runs_between_closings() {
        let period = resolve_period(10, 2024, 3).unwrap();
        assert_eq!(period.start, date(2024, 2, 11));
        assert_eq!(period.end, date(2024, 3, 10));
    }

    #[test]
    fn test_period_spans_year_boundary() {
        let period = resolve_period(10, 2024, 1).unwrap();
        assert_eq!(period.start, date(2023, 12, 11));
        assert_eq!(period.end, date(2024, 1, 10));
    }

    #[test]
    fn test_closing_day_clamps_to_month_length() {
        let period = resolve_period(31, 2024, 2).unwrap();
        assert_eq!(period.end, date(2024, 2, 29));
        assert_eq!(period.end.day(), clamp_day(2024, 2, 31));

        let period = resolve_period(31, 2023, 2).unwrap();
        assert_eq!(period.end, date(2023, 2, 28));
    }

    #[test]
    fn test_consecutive_periods_are_contiguous() {
        for closing_day in [1, 10, 28, 29, 30, 31] {
            let mut previous_end = resolve_period(closing_day, 2023, 12).unwrap().end;
            for month in 1..=12 {
                let period = resolve_period(closing_day, 2024, month).unwrap();
                assert_eq!(
                    period.start,
                    previous_end.succ_opt().unwrap(),
                    "closing day {} month {}",
                    closing_day,
                    month
                );
                assert!(period.start <= period.end);
                previous_end = period.end;
            }
        }
    }

    #[test]
    fn test_membership_examples() {
        // card closes on the 10th
        let march = resolve_period(10, 2024, 3).unwrap();
        assert!(march.contains(date(2024, 3, 5)));
        assert!(!march.contains(date(2024, 3, 15)));

        let april = resolve_period(10, 2024, 4).unwrap();
        assert!(april.contains(date(2024, 3, 15)));
    }

    #[test]
    fn test_preview_before_closing_stays_in_month() {
        let period = preview_period(10, date(2024, 3, 8)).unwrap();
        assert_eq!(period.end, date(2024, 3, 10));
    }

    #[test]
    fn test_preview_on_closing_day_stays_in_month() {
        let period = preview_period(10, date(2024, 3, 10)).unwrap();
        assert_eq!(period.end, date(2024, 3, 10));
    }

    #[test]
    fn test_preview_after_closing_advances_a_month() {
        let period = preview_period(10, date(2024, 3, 11)).unwrap();
        assert_eq!(period.end, date(2024, 4, 10));
        assert_eq!(period.start, date(2024, 3, 11));
    }

    #[test]
    fn test_preview_across_year_boundary() {
        let period = preview_period(10, date(2024, 12, 20)).unwrap();
        assert_eq!(period.end, date(2025, 1, 10));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(resolve_period(10, 2024, 13).is_err());
        assert!(resolve_period(10, 2024, 0).is_err());
    }
}
