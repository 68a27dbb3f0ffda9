//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! chart = "pie"               # "bar" (default) or "pie"
//! export_file = "history.csv" # default path for `export`
//! log_level = "info"          # any EnvFilter directive
//! log_file = "afford.log"     # optional, appended to
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use afford_core::{ChartKind, CsvExport};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings loaded from the config file, with defaults for anything unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Chart style shown after each check.
    pub chart: ChartKind,

    /// Where `export` writes when no path is given.
    pub export_file: PathBuf,

    /// Default log filter when neither `--log-level` nor `RUST_LOG` is set.
    pub log_level: String,

    /// Log file to append to, in addition to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chart: ChartKind::Bar,
            export_file: PathBuf::from(CsvExport::FILE_NAME),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(
        input: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads the config file at `path`, or returns defaults when `path` is `None`.
    ///
    /// An explicitly given path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
