//! Shared CLI types: errors, exit codes and rule table resolution.

use crate::config::Config;
use crate::models::RuleTable;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (bad rules, failed validation, bad arguments)
    ValidationFailed = 1,
    /// Reading or writing files failed
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code to terminate with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Input or validation problem.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationFailed,
            message: message.into(),
        }
    }

    /// File system problem.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Where the rule table of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Rule file given on the command line or in the config
    File(PathBuf),
    /// Rules compiled into the binary
    BuiltIn,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => write!(f, "built-in rules"),
        }
    }
}

/// Picks the rule source: `--rules` first, then the config, then built-in.
#[must_use]
pub fn rule_source(explicit: Option<&Path>, config: &Config) -> RuleSource {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.paths.rules_file.clone())
        .map_or(RuleSource::BuiltIn, RuleSource::File)
}

/// Loads the rule table from `source`.
pub fn load_rule_table(source: &RuleSource) -> CliResult<RuleTable> {
    debug!(source = %source, "loading rule table");
    match source {
        RuleSource::File(path) => {
            if !path.exists() {
                return Err(CliError::io(format!(
                    "Rule file not found: {}",
                    path.display()
                )));
            }
            crate::parser::load_rule_file(path)
                .map_err(|e| CliError::validation(format!("Failed to load rules: {e:#}")))
        }
        RuleSource::BuiltIn => crate::rules::default_table()
            .map_err(|e| CliError::validation(format!("Built-in rules are invalid: {e:#}"))),
    }
}

/// Loads the config for a command run.
///
/// A missing config file yields defaults; a config that fails to parse or
/// validate stops the run instead of silently falling back.
pub fn load_config() -> CliResult<Config> {
    Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}
