use std::io::{self, IsTerminal};

use afford_cli::cli::{CheckArgs, Cli, Command};
use afford_cli::config::AppConfig;
use afford_cli::logging;
use afford_cli::render::{render_chart, render_outcome};
use afford_cli::repl::Repl;
use afford_core::Session;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

// ─── commands ────────────────────────────────────────────────────────────────

/// One evaluation, printed to stdout. Invalid input is an error exit.
fn run_check(
    args: &CheckArgs,
    config: &AppConfig,
) -> Result<()> {
    let mut session = Session::new(args.chart.unwrap_or(config.chart));
    let input = args.to_input();

    let outcome = session
        .check_affordability(input.clone())
        .context("cannot evaluate purchase")?;

    print!("{}", render_outcome(&input, &outcome));
    print!("{}", render_chart(&outcome.chart, outcome.chart_kind));
    Ok(())
}

fn run_session(config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut repl = Repl::new(config).with_prompt(prompt);
    repl.run(stdin.lock(), io::stdout().lock())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let env_filter = std::env::var("RUST_LOG").ok();
    let filter = logging::resolve_filter(
        cli.log_level.as_deref(),
        env_filter.as_deref(),
        &config.log_level,
    )?;
    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    logging::init_logging(filter, log_file)?;
    debug!(?config, "starting");

    match &cli.command {
        Some(Command::Check(args)) => run_check(args, &config),
        Some(Command::Session) | None => run_session(&config),
    }
}
