use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User-facing outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Affordable,
    NotAffordable,
}

impl Verdict {
    pub fn from_affordable(affordable: bool) -> Self {
        if affordable {
            Verdict::Affordable
        } else {
            Verdict::NotAffordable
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Affordable => "You can afford this!",
            Verdict::NotAffordable => "Not affordable right now.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a single affordability evaluation.
///
/// Amounts are kept at full decimal precision; rounding to cents happens only
/// when the value is displayed or exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Equal monthly installment, zero for one-time purchases.
    pub monthly_installment: Decimal,

    /// Cash leaving the budget this month because of the purchase.
    ///
    /// The installment for EMI purchases, the full purchase amount otherwise.
    pub monthly_outflow: Decimal,

    /// Income minus expenses minus the monthly outflow. May be negative.
    pub monthly_leftover: Decimal,

    /// Total amount paid over the life of the purchase.
    ///
    /// For EMI this is installment × months; otherwise the purchase amount.
    pub total_payable: Decimal,

    pub affordable: bool,

    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_affordable(self.affordable)
    }

    /// Interest paid on top of the principal over the full term.
    pub fn total_interest(
        &self,
        purchase_amount: Decimal,
    ) -> Decimal {
        (self.total_payable - purchase_amount).max(Decimal::ZERO)
    }

    /// Compares the computed values of two results, ignoring when they were made.
    pub fn same_outcome(
        &self,
        other: &EvaluationResult,
    ) -> bool {
        self.monthly_installment == other.monthly_installment
            && self.monthly_outflow == other.monthly_outflow
            && self.monthly_leftover == other.monthly_leftover
            && self.total_payable == other.total_payable
            && self.affordable == other.affordable
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample(timestamp: DateTime<Utc>) -> EvaluationResult {
        EvaluationResult {
            monthly_installment: dec!(100),
            monthly_outflow: dec!(100),
            monthly_leftover: dec!(900),
            total_payable: dec!(1200),
            affordable: true,
            timestamp,
        }
    }

    #[test]
    fn verdict_messages() {
        assert_eq!(Verdict::Affordable.to_string(), "You can afford this!");
        assert_eq!(Verdict::NotAffordable.to_string(), "Not affordable right now.");
    }

    #[test]
    fn same_outcome_ignores_timestamp() {
        let first = sample(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let second = sample(Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap());

        assert!(first.same_outcome(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn total_interest_is_payable_minus_principal() {
        let result = EvaluationResult {
            total_payable: dec!(1279.42),
            ..sample(Utc::now())
        };

        assert_eq!(result.total_interest(dec!(1200)), dec!(79.42));
    }

    #[test]
    fn total_interest_never_negative() {
        let result = sample(Utc::now());

        assert_eq!(result.total_interest(dec!(5000)), dec!(0));
    }
}
