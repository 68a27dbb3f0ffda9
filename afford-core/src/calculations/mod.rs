//! Affordability calculations.
//!
//! This module provides the EMI amortization formula and the affordability
//! predicate that together make up a single evaluation.

pub mod affordability;
pub mod common;
pub mod emi;
pub mod error;

pub use affordability::{evaluate, evaluate_at, validate};
pub use emi::{monthly_installment, monthly_rate};
pub use error::EvaluationError;
