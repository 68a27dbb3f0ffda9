use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the purchase is paid for.
///
/// The EMI term and rate only exist on the [`PaymentPlan::Emi`] variant, so a
/// one-time purchase cannot be influenced by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPlan {
    /// Paid in full this month.
    #[default]
    OneTime,

    /// Amortized over `months` equal monthly installments.
    Emi {
        /// Amortization term, at least one month.
        months: u32,
        /// Nominal annual interest rate as a percentage (e.g. `12` for 12%).
        annual_interest_rate_percent: Decimal,
    },
}

impl PaymentPlan {
    /// Shorthand for an EMI plan.
    pub fn emi(
        months: u32,
        annual_interest_rate_percent: Decimal,
    ) -> Self {
        PaymentPlan::Emi {
            months,
            annual_interest_rate_percent,
        }
    }

    pub fn uses_emi(&self) -> bool {
        matches!(self, PaymentPlan::Emi { .. })
    }

    /// The amortization term, if EMI is selected.
    pub fn months(&self) -> Option<u32> {
        match self {
            PaymentPlan::OneTime => None,
            PaymentPlan::Emi { months, .. } => Some(*months),
        }
    }

    /// The annual interest rate percentage, if EMI is selected.
    pub fn annual_interest_rate_percent(&self) -> Option<Decimal> {
        match self {
            PaymentPlan::OneTime => None,
            PaymentPlan::Emi {
                annual_interest_rate_percent,
                ..
            } => Some(*annual_interest_rate_percent),
        }
    }
}

/// Everything needed for a single affordability evaluation.
///
/// Built fresh for every check; nothing here is retained except through the
/// [`HistoryRecord`](crate::HistoryRecord) snapshot the ledger takes.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use afford_core::{EvaluationInput, PaymentPlan};
///
/// let input = EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120))
///     .with_emi(12, dec!(12));
///
/// assert_eq!(input.payment_plan, PaymentPlan::emi(12, dec!(12)));
/// assert_eq!(input.monthly_surplus(), dec!(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Monthly income.
    pub income: Decimal,

    /// Monthly recurring expenses.
    pub expenses: Decimal,

    /// Available lump-sum funds.
    pub bank_balance: Decimal,

    /// Cost of the prospective purchase.
    pub purchase_amount: Decimal,

    pub payment_plan: PaymentPlan,
}

impl EvaluationInput {
    /// Creates an input for a purchase paid in full.
    pub fn one_time(
        income: Decimal,
        expenses: Decimal,
        bank_balance: Decimal,
        purchase_amount: Decimal,
    ) -> Self {
        Self {
            income,
            expenses,
            bank_balance,
            purchase_amount,
            payment_plan: PaymentPlan::OneTime,
        }
    }

    /// Switches the input to an EMI plan.
    pub fn with_emi(
        self,
        months: u32,
        annual_interest_rate_percent: Decimal,
    ) -> Self {
        Self {
            payment_plan: PaymentPlan::emi(months, annual_interest_rate_percent),
            ..self
        }
    }

    /// Income minus expenses, before the purchase is considered.
    pub fn monthly_surplus(&self) -> Decimal {
        self.income - self.expenses
    }
}
