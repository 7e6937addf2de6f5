//! Error types for the `suisui` command line tool.

use thiserror::Error;

/// Errors raised while configuring the tool.
///
/// Failures while running a command are reported through `eyre` with
/// context.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = CliError::InvalidConfig("unknown log level".to_owned());
        assert_eq!(error.to_string(), "invalid configuration: unknown log level");
    }
}
