//! A single interactive session.
//!
//! The session owns its history ledger outright. Nothing is shared between
//! sessions, so two users evaluating purchases at the same time each work on
//! their own [`Session`] value.

use chrono::{DateTime, Utc};

use crate::calculations::{EvaluationError, evaluate_at};
use crate::ledger::{CsvExport, ExportError, HistoryLedger};
use crate::models::{ChartData, ChartKind, EvaluationInput, EvaluationResult};

/// What the presentation layer needs after a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub result: EvaluationResult,
    pub chart: ChartData,
    pub chart_kind: ChartKind,
}

/// Session state: the history ledger and the selected chart style.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use afford_core::{EvaluationInput, Session};
///
/// let mut session = Session::default();
///
/// let outcome = session
///     .check_affordability(EvaluationInput::one_time(dec!(1000), dec!(1000), dec!(0), dec!(500)))
///     .unwrap();
/// assert!(!outcome.result.affordable);
/// assert_eq!(session.history().len(), 1);
///
/// // Invalid input is rejected before anything is recorded
/// let bad = EvaluationInput::one_time(dec!(-1), dec!(0), dec!(0), dec!(0));
/// assert!(session.check_affordability(bad).is_err());
/// assert_eq!(session.history().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    ledger: HistoryLedger,
    chart_kind: ChartKind,
}

impl Session {
    pub fn new(chart_kind: ChartKind) -> Self {
        Self {
            ledger: HistoryLedger::new(),
            chart_kind,
        }
    }

    /// Evaluates the purchase and records it in the history.
    ///
    /// Evaluation and append happen together: if evaluation fails the ledger
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] for invalid input.
    pub fn check_affordability(
        &mut self,
        input: EvaluationInput,
    ) -> Result<Outcome, EvaluationError> {
        self.check_affordability_at(input, Utc::now())
    }

    /// Same as [`check_affordability`](Self::check_affordability) with an
    /// explicit evaluation time.
    pub fn check_affordability_at(
        &mut self,
        input: EvaluationInput,
        timestamp: DateTime<Utc>,
    ) -> Result<Outcome, EvaluationError> {
        let result = evaluate_at(&input, timestamp)?;
        let chart = ChartData::from_result(&input, &result);
        self.ledger.append(input, result.clone());

        Ok(Outcome {
            result,
            chart,
            chart_kind: self.chart_kind,
        })
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Empties the history. Returns the number of records removed.
    pub fn clear_history(&mut self) -> usize {
        self.ledger.clear()
    }

    pub fn export_history(&self) -> Result<CsvExport, ExportError> {
        self.ledger.export()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn set_chart_kind(
        &mut self,
        chart_kind: ChartKind,
    ) {
        self.chart_kind = chart_kind;
    }

    /// Chart data for the most recent evaluation, if any.
    pub fn latest_chart(&self) -> Option<ChartData> {
        self.ledger.latest().map(ChartData::from_record)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn affordable_input() -> EvaluationInput {
        EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120))
    }

    #[test]
    fn check_records_evaluation() {
        let mut session = Session::new(ChartKind::Pie);

        let outcome = session.check_affordability(affordable_input()).unwrap();

        assert!(outcome.result.affordable);
        assert_eq!(outcome.chart_kind, ChartKind::Pie);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().latest().unwrap().result(), &outcome.result);
    }

    #[test]
    fn rejected_input_leaves_history_untouched() {
        let mut session = Session::default();
        session.check_affordability(affordable_input()).unwrap();
        let before = session.history().clone();

        let bad = affordable_input().with_emi(0, dec!(5));
        let result = session.check_affordability(bad);

        assert_eq!(result, Err(EvaluationError::InvalidTerm));
        assert_eq!(session.history(), &before);
    }

    #[test]
    fn clear_history_returns_removed_count() {
        let mut session = Session::default();
        session.check_affordability(affordable_input()).unwrap();
        session.check_affordability(affordable_input()).unwrap();

        assert_eq!(session.clear_history(), 2);
        assert!(session.history().is_empty());
        assert!(session.latest_chart().is_none());
    }

    #[test]
    fn sessions_do_not_share_history() {
        let mut alice = Session::default();
        let bob = Session::default();

        alice.check_affordability(affordable_input()).unwrap();

        assert_eq!(alice.history().len(), 1);
        assert_eq!(bob.history().len(), 0);
    }

    #[test]
    fn chart_kind_can_change_between_checks() {
        let mut session = Session::default();
        assert_eq!(session.chart_kind(), ChartKind::Bar);

        session.set_chart_kind(ChartKind::Pie);
        let outcome = session.check_affordability(affordable_input()).unwrap();

        assert_eq!(outcome.chart_kind, ChartKind::Pie);
    }

    #[test]
    fn latest_chart_reflects_last_check() {
        let mut session = Session::default();
        session.check_affordability(affordable_input()).unwrap();

        let chart = session.latest_chart().unwrap();

        assert_eq!(chart.value(ChartData::LEFTOVER), Some(dec!(880)));
    }

    #[test]
    fn export_history_includes_every_record() {
        let mut session = Session::default();
        session.check_affordability(affordable_input()).unwrap();
        session.check_affordability(affordable_input()).unwrap();

        let export = session.export_history().unwrap();

        assert_eq!(export.as_str().unwrap().lines().count(), 3);
    }
}
