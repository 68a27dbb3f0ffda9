//! Line-oriented interactive session.
//!
//! Each line is one command. Mistakes are reported and the session carries
//! on; only I/O failures on the output stream end it early.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use afford_core::{ChartKind, ChartKindParseError, Session};
use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::input::parse_check_args;
use crate::logging;
use crate::render::{render_chart, render_history, render_outcome};

const HELP: &str = "\
Commands:
  check key=value...   Evaluate a purchase. Keys: income, expenses, balance,
                       purchase, emi (months), rate (annual %)
  history              Show every check made this session
  export [path]        Write the history as CSV
  clear                Clear the history
  chart bar|pie        Choose the chart type
  log <level>          Change the log filter
  help                 Show this message
  quit                 Leave the session
";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check(Vec<String>),
    History,
    Export(Option<PathBuf>),
    Clear,
    Chart(ChartKind),
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    ChartKind(#[from] ChartKindParseError),
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "check" => Command::Check(rest.iter().map(|s| s.to_string()).collect()),
            "history" => Command::History,
            "export" => Command::Export(rest.first().map(PathBuf::from)),
            "clear" => Command::Clear,
            "chart" => {
                let kind = rest.first().ok_or(CommandError::MissingArgument("chart"))?;
                Command::Chart(kind.parse()?)
            }
            "log" => {
                let level = rest.first().ok_or(CommandError::MissingArgument("log"))?;
                Command::Log(level.to_string())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Interactive session driver.
///
/// Owns the [`Session`], so its history lives exactly as long as the REPL.
pub struct Repl {
    session: Session,
    export_file: PathBuf,
    prompt: bool,
}

impl Repl {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: Session::new(config.chart),
            export_file: config.export_file.clone(),
            prompt: false,
        }
    }

    /// Print a `> ` prompt before each line (for terminals).
    pub fn with_prompt(
        mut self,
        prompt: bool,
    ) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
    ) -> Result<()> {
        writeln!(out, "Can I Afford This? Type 'help' for commands.")?;
        self.show_prompt(&mut out)?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command, &mut out)? == Control::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(out, "error: {e}")?,
            }
            self.show_prompt(&mut out)?;
        }

        info!(
            records = self.session.history().len(),
            "Session ended"
        );
        Ok(())
    }

    /// Runs one command. Command-level failures are printed to `out`; only
    /// write errors on `out` are returned.
    pub fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Control> {
        match command {
            Command::Check(args) => self.check(&args, out)?,
            Command::History => write!(out, "{}", render_history(self.session.history()))?,
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.export_file.clone());
                match self.export(&path) {
                    Ok(count) => writeln!(
                        out,
                        "Exported {count} record{} to {} (text/csv)",
                        if count == 1 { "" } else { "s" },
                        path.display()
                    )?,
                    Err(e) => {
                        warn!(error = ?e, "export failed");
                        writeln!(out, "error: {e:#}")?
                    }
                }
            }
            Command::Clear => {
                let removed = self.session.clear_history();
                writeln!(out, "Cleared {removed} record{}.", if removed == 1 { "" } else { "s" })?;
                write!(out, "{}", render_history(self.session.history()))?;
            }
            Command::Chart(kind) => {
                self.session.set_chart_kind(kind);
                writeln!(out, "Chart type set to {kind}.")?;
            }
            Command::Log(level) => match logging::set_log_level(&level) {
                Ok(()) => writeln!(out, "Log level set to {level}.")?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => return Ok(Control::Quit),
        }
        Ok(Control::Continue)
    }

    fn check<W: Write>(
        &mut self,
        args: &[String],
        out: &mut W,
    ) -> Result<()> {
        let input = match parse_check_args(args.iter().map(String::as_str)) {
            Ok(input) => input,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                return Ok(());
            }
        };

        match self.session.check_affordability(input.clone()) {
            Ok(outcome) => {
                write!(out, "{}", render_outcome(&input, &outcome))?;
                write!(out, "{}", render_chart(&outcome.chart, outcome.chart_kind))?;
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
        Ok(())
    }

    fn export(
        &self,
        path: &Path,
    ) -> Result<usize> {
        let export = self
            .session
            .export_history()
            .context("failed to serialize history")?;
        std::fs::write(path, &export.bytes)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        info!(path = %path.display(), "Wrote history CSV");
        Ok(self.session.history().len())
    }

    fn show_prompt<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<()> {
        if self.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }
}
