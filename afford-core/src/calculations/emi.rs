//! Equal monthly installment (EMI) amortization.
//!
//! A fixed-rate loan of principal `P` repaid over `n` months at periodic rate
//! `r` has the installment
//!
//! ```text
//! EMI = P × r × (1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! With `r = 0` the formula degenerates to `0 / 0`, so that case is handled as
//! straight-line division `P / n` before the formula is ever evaluated. A
//! positive annual rate too small to survive the conversion to a monthly rate
//! at decimal precision takes the same branch. Any non-zero `r` is at least
//! `1e-28`, which keeps `(1 + r)^n − 1` non-zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use afford_core::calculations::common::round_half_up;
//! use afford_core::calculations::monthly_installment;
//!
//! // 1200 over 12 months at 12% a year (1% a month)
//! let emi = monthly_installment(dec!(1200), 12, dec!(12)).unwrap();
//! assert_eq!(round_half_up(emi), dec!(106.62));
//!
//! // Interest-free plans split the principal evenly
//! let emi = monthly_installment(dec!(1200), 12, dec!(0)).unwrap();
//! assert_eq!(emi, dec!(100));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use tracing::{debug, warn};

use super::common::MONTHS_PER_YEAR;
use super::error::EvaluationError;

/// Converts a nominal annual percentage into the monthly periodic rate.
///
/// `r = annual_interest_rate_percent / 100 / 12`
pub fn monthly_rate(annual_interest_rate_percent: Decimal) -> Decimal {
    annual_interest_rate_percent / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}

/// Calculates the equal monthly installment for `principal` over `months`.
///
/// The result is returned at full precision; round it for display.
///
/// # Errors
///
/// - [`EvaluationError::InvalidTerm`] if `months` is zero.
/// - [`EvaluationError::InvalidInput`] if `principal` or the rate is negative.
/// - [`EvaluationError::Overflow`] if compounding over the term exceeds the
///   decimal range.
pub fn monthly_installment(
    principal: Decimal,
    months: u32,
    annual_interest_rate_percent: Decimal,
) -> Result<Decimal, EvaluationError> {
    if months == 0 {
        return Err(EvaluationError::InvalidTerm);
    }
    if principal < Decimal::ZERO {
        return Err(EvaluationError::InvalidInput {
            field: "purchase_amount",
            value: principal,
        });
    }
    if annual_interest_rate_percent < Decimal::ZERO {
        return Err(EvaluationError::InvalidInput {
            field: "annual_interest_rate_percent",
            value: annual_interest_rate_percent,
        });
    }

    let rate = monthly_rate(annual_interest_rate_percent);
    if rate.is_zero() {
        if !annual_interest_rate_percent.is_zero() {
            warn!(
                annual_interest_rate_percent = %annual_interest_rate_percent,
                months,
                "Interest rate is negligible at decimal precision; using straight-line installment"
            );
        }
        return Ok(straight_line(principal, months));
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(months))
        .ok_or(EvaluationError::Overflow {
            quantity: "emi_months",
        })?;
    let denominator = growth - Decimal::ONE;

    let installment = principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_mul(growth))
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or(EvaluationError::Overflow {
            quantity: "monthly_installment",
        })?;

    debug!(
        principal = %principal,
        months,
        monthly_rate = %rate,
        installment = %installment,
        "Computed amortized installment"
    );

    Ok(installment)
}

/// Interest-free installment: the principal split evenly across the term.
fn straight_line(
    principal: Decimal,
    months: u32,
) -> Decimal {
    principal / Decimal::from(months)
}
