//! Rounding and formatting helpers shared by the engine, the ledger export
//! and the presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Months in a year, used to turn an annual rate into a periodic one.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use afford_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(106.6185)), dec!(106.62));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a currency amount with exactly two decimal places.
///
/// Rounds half-up first, then pads to two places. A value that rounds to zero
/// is always printed without a sign.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use afford_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(100)), "100.00");
/// assert_eq!(format_currency(dec!(-500)), "-500.00");
/// assert_eq!(format_currency(dec!(106.61854641401)), "106.62");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    rounded.to_string()
}
