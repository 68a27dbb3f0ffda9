pub mod chart;
pub mod evaluation_input;
pub mod evaluation_result;
pub mod history_record;

pub use chart::{ChartColor, ChartData, ChartKind, ChartKindParseError, ChartSlice};
pub use evaluation_input::{EvaluationInput, PaymentPlan};
pub use evaluation_result::{EvaluationResult, Verdict};
pub use history_record::HistoryRecord;
