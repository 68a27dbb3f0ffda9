use std::path::PathBuf;

use afford_core::{ChartKind, EvaluationInput};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::input::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Can I afford this? A monthly budgeting calculator.
///
/// Checks whether a purchase fits this month's budget, either paid in full
/// or financed with equal monthly installments, and keeps a history of every
/// check for the rest of the session.
#[derive(Debug, Parser)]
#[command(name = "afford", version, about, long_about = None)]
pub struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `afford_core=trace`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a single purchase and exit.
    Check(CheckArgs),

    /// Start an interactive session (the default).
    Session,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Monthly income.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub income: Decimal,

    /// Monthly expenses.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub expenses: Decimal,

    /// Current bank balance.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub balance: Decimal,

    /// Purchase amount.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub purchase: Decimal,

    /// Buy in EMI over this many months.
    #[arg(long)]
    pub emi_months: Option<u32>,

    /// Annual interest rate in percent (EMI only).
    #[arg(long, requires = "emi_months", value_parser = parse_decimal)]
    pub interest_rate: Option<Decimal>,

    /// Chart type: bar or pie. Defaults to the config file setting.
    #[arg(long)]
    pub chart: Option<ChartKind>,
}

impl CheckArgs {
    pub fn to_input(&self) -> EvaluationInput {
        let input =
            EvaluationInput::one_time(self.income, self.expenses, self.balance, self.purchase);
        match self.emi_months {
            Some(months) => input.with_emi(months, self.interest_rate.unwrap_or_default()),
            None => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use afford_core::PaymentPlan;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn check_args(args: &[&str]) -> CheckArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Some(Command::Check(check)) => check,
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_session() {
        let cli = Cli::try_parse_from(["afford"]).unwrap();

        assert!(cli.command.is_none());
    }

    #[test]
    fn check_with_one_time_purchase() {
        let check = check_args(&[
            "afford",
            "check",
            "--income",
            "3,000",
            "--expenses",
            "2000",
            "--balance",
            "500",
            "--purchase",
            "120",
        ]);

        assert_eq!(
            check.to_input(),
            EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120))
        );
        assert_eq!(check.chart, None);
    }

    #[test]
    fn check_with_emi_and_pie_chart() {
        let check = check_args(&[
            "afford",
            "check",
            "--purchase",
            "1200",
            "--emi-months",
            "12",
            "--interest-rate",
            "12",
            "--chart",
            "pie",
        ]);

        assert_eq!(check.to_input().payment_plan, PaymentPlan::emi(12, dec!(12)));
        assert_eq!(check.chart, Some(ChartKind::Pie));
    }

    #[test]
    fn interest_rate_requires_emi_months() {
        let result = Cli::try_parse_from(["afford", "check", "--interest-rate", "5"]);

        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let result = Cli::try_parse_from(["afford", "check", "--income", "plenty"]);

        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["afford", "session", "--log-level", "debug"]).unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Some(Command::Session)));
    }
}
