//! Session-scoped history of evaluations.
//!
//! The ledger only ever grows by appending or shrinks by clearing; records are
//! never edited in place.

pub mod export;
pub mod history;

pub use export::{CSV_HEADERS, CsvExport, ExportError};
pub use history::HistoryLedger;
