//! The affordability predicate.
//!
//! # Decision Rules
//!
//! | Plan     | Monthly outflow | Affordable when |
//! |----------|-----------------|-----------------|
//! | One-time | purchase amount | `income − expenses ≥ purchase` **or** `bank balance ≥ purchase` |
//! | EMI      | installment     | `income − expenses − installment ≥ 0` |
//!
//! Bank balance is never consulted for EMI purchases: the purchase is
//! financed, so only recurring cash flow matters. A one-time purchase can be
//! covered by either the month's surplus or existing savings.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rust_decimal_macros::dec;
//! use afford_core::{EvaluationInput, evaluate_at};
//!
//! let input = EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120));
//! let result = evaluate_at(&input, Utc::now()).unwrap();
//!
//! assert_eq!(result.monthly_leftover, dec!(880));
//! assert!(result.affordable);
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::emi::monthly_installment;
use super::error::EvaluationError;
use crate::models::{EvaluationInput, EvaluationResult, PaymentPlan};

/// Evaluates a purchase, stamping the result with the current time.
///
/// # Errors
///
/// Returns [`EvaluationError`] if the input fails validation (see [`validate`])
/// or an intermediate value overflows.
pub fn evaluate(input: &EvaluationInput) -> Result<EvaluationResult, EvaluationError> {
    evaluate_at(input, Utc::now())
}

/// Evaluates a purchase with an explicit timestamp.
///
/// Identical inputs always produce identical amounts and decisions; only the
/// timestamp distinguishes two evaluations.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn evaluate_at(
    input: &EvaluationInput,
    timestamp: DateTime<Utc>,
) -> Result<EvaluationResult, EvaluationError> {
    validate(input)?;

    let (monthly_installment, total_payable) = match input.payment_plan {
        PaymentPlan::OneTime => (Decimal::ZERO, input.purchase_amount),
        PaymentPlan::Emi {
            months,
            annual_interest_rate_percent,
        } => {
            let installment =
                monthly_installment(input.purchase_amount, months, annual_interest_rate_percent)?;
            let total = installment
                .checked_mul(Decimal::from(months))
                .ok_or(EvaluationError::Overflow {
                    quantity: "total_payable",
                })?;
            (installment, total)
        }
    };

    let monthly_outflow = monthly_outflow(input, monthly_installment);
    let monthly_leftover = input
        .income
        .checked_sub(input.expenses)
        .and_then(|surplus| surplus.checked_sub(monthly_outflow))
        .ok_or(EvaluationError::Overflow {
            quantity: "monthly_leftover",
        })?;
    let affordable = is_affordable(input, monthly_leftover);

    debug!(
        uses_emi = input.payment_plan.uses_emi(),
        purchase_amount = %input.purchase_amount,
        monthly_outflow = %monthly_outflow,
        monthly_leftover = %monthly_leftover,
        affordable,
        "Evaluated purchase"
    );

    Ok(EvaluationResult {
        monthly_installment,
        monthly_outflow,
        monthly_leftover,
        total_payable,
        affordable,
        timestamp,
    })
}

/// Checks that every amount is non-negative and any EMI term is at least
/// one month.
///
/// Fields are checked in declaration order and the first offending one is
/// reported.
///
/// # Errors
///
/// - [`EvaluationError::InvalidInput`] naming the negative field.
/// - [`EvaluationError::InvalidTerm`] for a zero-month EMI plan.
pub fn validate(input: &EvaluationInput) -> Result<(), EvaluationError> {
    let amounts = [
        ("income", input.income),
        ("expenses", input.expenses),
        ("bank_balance", input.bank_balance),
        ("purchase_amount", input.purchase_amount),
    ];
    for (field, value) in amounts {
        non_negative(field, value)?;
    }

    if let PaymentPlan::Emi {
        months,
        annual_interest_rate_percent,
    } = input.payment_plan
    {
        if months == 0 {
            warn!("Rejected EMI plan with a zero-month term");
            return Err(EvaluationError::InvalidTerm);
        }
        non_negative("annual_interest_rate_percent", annual_interest_rate_percent)?;
    }

    Ok(())
}

fn non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), EvaluationError> {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "Rejected negative input");
        return Err(EvaluationError::InvalidInput { field, value });
    }
    Ok(())
}

/// Cash leaving the budget this month: the installment when financed,
/// otherwise the whole purchase.
fn monthly_outflow(
    input: &EvaluationInput,
    installment: Decimal,
) -> Decimal {
    match input.payment_plan {
        PaymentPlan::OneTime => input.purchase_amount,
        PaymentPlan::Emi { .. } => installment,
    }
}

fn is_affordable(
    input: &EvaluationInput,
    monthly_leftover: Decimal,
) -> bool {
    match input.payment_plan {
        PaymentPlan::Emi { .. } => monthly_leftover >= Decimal::ZERO,
        PaymentPlan::OneTime => {
            input.monthly_surplus() >= input.purchase_amount
                || input.bank_balance >= input.purchase_amount
        }
    }
}
