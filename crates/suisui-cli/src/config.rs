//! Tool configuration read from the environment and overridden by flags.
//!
//! Precedence, highest first: command line flags, `SUISUI_*` environment
//! variables, defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "SUISUI_LOG_LEVEL";
/// Environment variable holding the default step export path.
pub const STEPS_EXPORT_VAR: &str = "SUISUI_STEPS_EXPORT";

/// Log verbosity, mapped onto `tracing` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-definition matching.
    Trace,
    /// Parsing and resolution details.
    Debug,
    /// Loaded exports and features.
    Info,
    /// Problems only.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    #[must_use]
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Settings shared by every subcommand.
///
/// # Environment Variables
///
/// - `SUISUI_LOG_LEVEL`: trace, debug, info, warn, or error
/// - `SUISUI_STEPS_EXPORT`: path of the step-export JSON used when a command
///   is not given `--export`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Step export to resolve steps against; `None` means an empty catalog.
    pub export: Option<PathBuf>,
}

impl CliConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] when `SUISUI_LOG_LEVEL` is not a
    /// known level.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// an environment variable if set.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] for an unknown log level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(value) => value.parse()?,
            None => LogLevel::default(),
        };
        let export = lookup(STEPS_EXPORT_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self { log_level, export })
    }

    /// Let command line flags take precedence over the environment.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, export: Option<PathBuf>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if export.is_some() {
            self.export = export;
        }
        self
    }

    /// Replace the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
