//! Plain-text rendering of results, charts and the history table.

use afford_core::calculations::common::format_currency;
use afford_core::{ChartData, ChartKind, EvaluationInput, HistoryLedger, Outcome, PaymentPlan};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Width of the longest bar, in characters.
const BAR_WIDTH: u32 = 40;

const LABEL_WIDTH: usize = 9;

/// Verdict, leftover and (for EMI) installment details.
pub fn render_outcome(
    input: &EvaluationInput,
    outcome: &Outcome,
) -> String {
    let result = &outcome.result;
    let mut out = String::new();

    out.push_str(&format!("{}\n", result.verdict()));
    out.push_str(&format!(
        "After this purchase, your monthly leftover would be: ${}\n",
        format_currency(result.monthly_leftover)
    ));

    if let PaymentPlan::Emi {
        months,
        annual_interest_rate_percent,
    } = input.payment_plan
    {
        out.push_str(&format!(
            "Monthly EMI: ${} for {} month{} at {}% a year\n",
            format_currency(result.monthly_installment),
            months,
            if months == 1 { "" } else { "s" },
            annual_interest_rate_percent.normalize()
        ));
        out.push_str(&format!(
            "Total payable: ${} (interest ${})\n",
            format_currency(result.total_payable),
            format_currency(result.total_interest(input.purchase_amount))
        ));
    }

    out
}

/// Draws the chart in the requested style.
pub fn render_chart(
    chart: &ChartData,
    kind: ChartKind,
) -> String {
    match kind {
        ChartKind::Bar => render_bar_chart(chart),
        ChartKind::Pie => render_pie_chart(chart),
    }
}

/// Horizontal bars scaled to the largest magnitude. Negative values are drawn
/// with `-` instead of `#`.
fn render_bar_chart(chart: &ChartData) -> String {
    let max = chart.max_magnitude();
    let mut out = String::new();

    for slice in chart.slices() {
        let length = if max.is_zero() {
            0
        } else {
            // The ratio lies in [0, 1], so scaling it to the bar width stays in range.
            (slice.value.abs() / max * Decimal::from(BAR_WIDTH))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_usize()
                .unwrap_or(0)
        };
        let mark = if slice.value < Decimal::ZERO { "-" } else { "#" };
        let bar = mark.repeat(length);

        out.push_str(&format!(
            "{:<label$}|{:<width$} {}\n",
            slice.label,
            bar,
            format_currency(slice.value),
            label = LABEL_WIDTH,
            width = BAR_WIDTH as usize,
        ));
    }

    out
}

fn render_pie_chart(chart: &ChartData) -> String {
    chart
        .pie_shares()
        .into_iter()
        .zip(chart.slices())
        .map(|((label, share), slice)| {
            format!(
                "{:<label_width$}{:>6}%  ({})\n",
                label,
                format!("{share:.1}"),
                slice.color.name(),
                label_width = LABEL_WIDTH,
            )
        })
        .collect()
}

/// The history table, oldest first, or a placeholder when empty.
pub fn render_history(ledger: &HistoryLedger) -> String {
    if ledger.is_empty() {
        return "No history yet.\n".to_string();
    }

    let mut out = format!(
        "{:<19}  {:<25}  {:>12}  {:>12}  {:>12}\n",
        "Time", "Result", "Purchase", "Monthly EMI", "Leftover"
    );
    for record in ledger {
        out.push_str(&format!(
            "{:<19}  {:<25}  {:>12}  {:>12}  {:>12}\n",
            record.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
            record.verdict().message(),
            format_currency(record.purchase_amount()),
            format_currency(record.monthly_installment()),
            format_currency(record.monthly_leftover()),
        ));
    }
    out
}
