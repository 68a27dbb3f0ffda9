//! Named quantities handed to the chart renderer.
//!
//! The core only decides *what* is plotted: income, expenses, leftover and the
//! monthly cost of the purchase. How it is drawn (bar or pie) is up to the
//! presentation layer and has no effect on the evaluation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{EvaluationInput, EvaluationResult, HistoryRecord};

/// Chart style selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl ChartKind {
    pub fn all() -> &'static [ChartKind] {
        &[ChartKind::Bar, ChartKind::Pie]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a chart kind name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown chart kind '{0}' (expected 'bar' or 'pie')")]
pub struct ChartKindParseError(pub String);

impl FromStr for ChartKind {
    type Err = ChartKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ChartKind::all()
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChartKindParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartColor {
    Green,
    Red,
    Blue,
    Orange,
}

impl ChartColor {
    pub fn name(&self) -> &'static str {
        match self {
            ChartColor::Green => "green",
            ChartColor::Red => "red",
            ChartColor::Blue => "blue",
            ChartColor::Orange => "orange",
        }
    }
}

/// One labelled quantity in the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: Decimal,
    pub color: ChartColor,
}

/// The `{Income, Expenses, Leftover, Purchase}` mapping for one evaluation.
///
/// `Purchase` is the monthly outflow: the installment for EMI purchases and
/// the full purchase amount otherwise.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use rust_decimal_macros::dec;
/// use afford_core::{ChartData, EvaluationInput, evaluate_at};
///
/// let input = EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120));
/// let result = evaluate_at(&input, Utc::now()).unwrap();
/// let chart = ChartData::from_result(&input, &result);
///
/// assert_eq!(chart.value("Leftover"), Some(dec!(880)));
/// assert_eq!(chart.value("Purchase"), Some(dec!(120)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    slices: Vec<ChartSlice>,
}

impl ChartData {
    pub const INCOME: &'static str = "Income";
    pub const EXPENSES: &'static str = "Expenses";
    pub const LEFTOVER: &'static str = "Leftover";
    pub const PURCHASE: &'static str = "Purchase";

    pub fn from_result(
        input: &EvaluationInput,
        result: &EvaluationResult,
    ) -> Self {
        Self {
            slices: vec![
                ChartSlice {
                    label: Self::INCOME,
                    value: input.income,
                    color: ChartColor::Green,
                },
                ChartSlice {
                    label: Self::EXPENSES,
                    value: input.expenses,
                    color: ChartColor::Red,
                },
                ChartSlice {
                    label: Self::LEFTOVER,
                    value: result.monthly_leftover,
                    color: ChartColor::Blue,
                },
                ChartSlice {
                    label: Self::PURCHASE,
                    value: result.monthly_outflow,
                    color: ChartColor::Orange,
                },
            ],
        }
    }

    pub fn from_record(record: &HistoryRecord) -> Self {
        Self::from_result(record.input(), record.result())
    }

    pub fn slices(&self) -> &[ChartSlice] {
        &self.slices
    }

    /// Looks up a quantity by label.
    pub fn value(
        &self,
        label: &str,
    ) -> Option<Decimal> {
        self.slices
            .iter()
            .find(|slice| slice.label == label)
            .map(|slice| slice.value)
    }

    /// Largest absolute value, used to scale bars.
    pub fn max_magnitude(&self) -> Decimal {
        self.slices
            .iter()
            .map(|slice| slice.value.abs())
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Percentage share of each slice, rounded to one decimal place.
    ///
    /// A pie cannot show a deficit, so negative values count as zero. When
    /// every value is zero all shares are zero.
    pub fn pie_shares(&self) -> Vec<(&'static str, Decimal)> {
        let clamped: Vec<(&'static str, Decimal)> = self
            .slices
            .iter()
            .map(|slice| {
                if slice.value < Decimal::ZERO {
                    warn!(
                        label = slice.label,
                        value = %slice.value,
                        "Negative value cannot be drawn as a pie slice; clamped to zero"
                    );
                    (slice.label, Decimal::ZERO)
                } else {
                    (slice.label, slice.value)
                }
            })
            .collect();

        // Shares are ratios, so dividing every value by the slice count leaves
        // them unchanged and keeps the total within range.
        let (clamped, total) = match sum_checked(clamped.iter().map(|(_, value)| *value)) {
            Some(total) => (clamped, total),
            None => {
                let count = Decimal::from(clamped.len());
                let scaled: Vec<(&'static str, Decimal)> = clamped
                    .into_iter()
                    .map(|(label, value)| (label, value / count))
                    .collect();
                let total =
                    sum_checked(scaled.iter().map(|(_, value)| *value)).unwrap_or(Decimal::MAX);
                (scaled, total)
            }
        };
        if total.is_zero() {
            return clamped
                .into_iter()
                .map(|(label, _)| (label, Decimal::ZERO))
                .collect();
        }

        clamped
            .into_iter()
            .map(|(label, value)| {
                // value / total lies in [0, 1]
                let share = (value / total * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                (label, share)
            })
            .collect()
    }
}

fn sum_checked(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}
