use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{EvaluationInput, EvaluationResult, PaymentPlan, Verdict};

/// A frozen snapshot of one evaluation, as stored in the history ledger.
///
/// Fields are private and there is no mutating API: once a record is in the
/// ledger it stays exactly as it was appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    input: EvaluationInput,
    result: EvaluationResult,
}

impl HistoryRecord {
    pub fn new(
        input: EvaluationInput,
        result: EvaluationResult,
    ) -> Self {
        Self { input, result }
    }

    pub fn input(&self) -> &EvaluationInput {
        &self.input
    }

    pub fn result(&self) -> &EvaluationResult {
        &self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.result.timestamp
    }

    pub fn verdict(&self) -> Verdict {
        self.result.verdict()
    }

    pub fn purchase_amount(&self) -> Decimal {
        self.input.purchase_amount
    }

    pub fn payment_plan(&self) -> PaymentPlan {
        self.input.payment_plan
    }

    pub fn monthly_leftover(&self) -> Decimal {
        self.result.monthly_leftover
    }

    pub fn monthly_installment(&self) -> Decimal {
        self.result.monthly_installment
    }
}
