//! Calendar-month arithmetic used by the billing engine.

use chrono::{Datelike, Months, NaiveDate};

/// Shifts a date forward by `months` calendar months, clamping the
/// day-of-month to the target month's length (Jan 31 + 1 month -> Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Shifts a date backward by `months` calendar months, clamping the
/// day-of-month to the target month's length.
pub fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Clamps `day` to the last valid day of the given month.
pub fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    day.min(days_in_month(year, month))
}
