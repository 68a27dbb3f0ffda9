//! CSV export of the history ledger.
//!
//! ## CSV Format
//!
//! One header row followed by one row per record, oldest first.
//!
//! | Column              | Notes                                          |
//! |---------------------|------------------------------------------------|
//! | `Time`              | `YYYY-MM-DD HH:MM:SS`, UTC                     |
//! | `Result`            | Verdict text shown to the user                 |
//! | `Income`            | 2 dp                                           |
//! | `Expenses`          | 2 dp                                           |
//! | `Bank Balance`      | 2 dp                                           |
//! | `Purchase`          | 2 dp                                           |
//! | `EMI Months`        | Empty for one-time purchases                   |
//! | `Interest Rate (%)` | Empty for one-time purchases                   |
//! | `Monthly EMI`       | 2 dp, `0.00` for one-time purchases            |
//! | `Leftover`          | 2 dp, may be negative                          |
//!
//! ### Example
//!
//! ```csv
//! Time,Result,Income,Expenses,Bank Balance,Purchase,EMI Months,Interest Rate (%),Monthly EMI,Leftover
//! 2025-07-01 10:00:00,You can afford this!,3000.00,2000.00,500.00,120.00,,,0.00,880.00
//! 2025-07-01 10:05:00,You can afford this!,1500.00,1000.00,0.00,1200.00,12,12,106.62,393.38
//! ```

use thiserror::Error;

use crate::calculations::common::format_currency;
use crate::models::HistoryRecord;

/// Header row of the exported CSV.
pub const CSV_HEADERS: [&str; 10] = [
    "Time",
    "Result",
    "Income",
    "Expenses",
    "Bank Balance",
    "Purchase",
    "EMI Months",
    "Interest Rate (%)",
    "Monthly EMI",
    "Leftover",
];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur while serializing the ledger.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV buffer: {0}")]
    Flush(String),
}

/// A downloadable CSV artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested name for the downloaded file.
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub const FILE_NAME: &'static str = "history.csv";
    pub const MIME_TYPE: &'static str = "text/csv";

    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            file_name: Self::FILE_NAME,
            mime_type: Self::MIME_TYPE,
            bytes,
        }
    }

    /// The export as UTF-8 text, if valid.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Converts one record into its CSV cells, in [`CSV_HEADERS`] order.
fn record_row(record: &HistoryRecord) -> [String; 10] {
    let input = record.input();
    let plan = record.payment_plan();

    [
        record.timestamp().format(TIME_FORMAT).to_string(),
        record.verdict().message().to_string(),
        format_currency(input.income),
        format_currency(input.expenses),
        format_currency(input.bank_balance),
        format_currency(input.purchase_amount),
        plan.months().map(|m| m.to_string()).unwrap_or_default(),
        plan.annual_interest_rate_percent()
            .map(|rate| rate.normalize().to_string())
            .unwrap_or_default(),
        format_currency(record.monthly_installment()),
        format_currency(record.monthly_leftover()),
    ]
}

/// Writes the header and every record to an in-memory CSV buffer.
pub(crate) fn write_csv(records: &[HistoryRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.write_record(record_row(record))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))
}
