use tracing::info;

use super::export::{CsvExport, ExportError, write_csv};
use crate::models::{EvaluationInput, EvaluationResult, HistoryRecord};

/// Append-only, session-scoped history of evaluations.
///
/// Insertion order is chronological order. The only ways to change the
/// ledger are [`append`](Self::append), which adds one record to the end, and
/// [`clear`](Self::clear), which removes all of them.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use afford_core::{EvaluationInput, HistoryLedger, evaluate};
///
/// let mut ledger = HistoryLedger::new();
/// let input = EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120));
/// let result = evaluate(&input).unwrap();
///
/// ledger.append(input, result);
/// assert_eq!(ledger.len(), 1);
///
/// let export = ledger.export().unwrap();
/// assert_eq!(export.mime_type, "text/csv");
///
/// ledger.clear();
/// assert!(ledger.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the evaluation and adds it to the end of the ledger.
    ///
    /// Earlier records are left untouched. Returns a copy of the stored
    /// record; the ledger keeps its own, which is never modified.
    pub fn append(
        &mut self,
        input: EvaluationInput,
        result: EvaluationResult,
    ) -> HistoryRecord {
        let record = HistoryRecord::new(input, result);
        self.records.push(record.clone());
        info!(records = self.records.len(), "Appended evaluation to history");
        record
    }

    /// Removes every record. Returns how many were removed.
    ///
    /// Clearing an empty ledger is a no-op. Redrawing whatever displays the
    /// ledger is left to the caller.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        info!(removed, "Cleared history");
        removed
    }

    /// Serializes the ledger to CSV without modifying it.
    ///
    /// An empty ledger exports as the header row only.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the CSV writer fails.
    pub fn export(&self) -> Result<CsvExport, ExportError> {
        let bytes = write_csv(&self.records)?;
        info!(
            records = self.records.len(),
            bytes = bytes.len(),
            "Exported history"
        );
        Ok(CsvExport::new(bytes))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }

    /// Most recently appended record.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }
}

impl<'a> IntoIterator for &'a HistoryLedger {
    type Item = &'a HistoryRecord;
    type IntoIter = std::slice::Iter<'a, HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
