use crate::constants::DISPLAY_DECIMAL_PRECISION;
use rust_decimal::Decimal;

/// Rounds a monetary amount to display precision. Every aggregate goes
/// through this before being compared or handed to the presentation layer.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DECIMAL_PRECISION)
}
