//! Diagnostic logging for the command line tool.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global `tracing` subscriber for `config`.
///
/// The first call wins; later calls leave the installed subscriber in place.
pub fn init_logging(config: &CliConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        debug!("logging already initialised");
    }
}
