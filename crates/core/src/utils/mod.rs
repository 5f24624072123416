pub mod decimal_utils;
pub mod time_utils;

pub use decimal_utils::round2;
pub use time_utils::{add_months, clamp_day, days_in_month, sub_months};
