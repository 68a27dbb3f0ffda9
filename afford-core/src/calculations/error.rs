use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while evaluating a purchase.
///
/// Inputs are validated before any arithmetic runs, so a rejected evaluation
/// never produces a partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// An amount or rate was negative. `field` names the offending input.
    #[error("{field} must be non-negative, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },

    /// An EMI plan was requested with a zero-month term.
    #[error("emi_months must be at least 1")]
    InvalidTerm,

    /// An intermediate value left the representable decimal range.
    #[error("{quantity} overflows the decimal range")]
    Overflow { quantity: &'static str },
}
