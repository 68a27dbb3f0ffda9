//! Affordability decision engine and session history ledger.
//!
//! The crate is split the same way the calculation flows:
//!
//! - [`calculations`] turns one [`EvaluationInput`] into an [`EvaluationResult`]
//!   (EMI amortization plus the affordability predicate).
//! - [`ledger`] keeps the append-only [`HistoryLedger`] and its CSV export.
//! - [`session`] ties both together for a single interactive session.

pub mod calculations;
pub mod ledger;
pub mod models;
pub mod session;

pub use calculations::{EvaluationError, evaluate, evaluate_at};
pub use ledger::{CsvExport, ExportError, HistoryLedger};
pub use models::*;
pub use session::{Outcome, Session};
