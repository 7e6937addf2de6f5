//! `suisui` binary: inspect step patterns, step exports, and feature files.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use suisui_cli::cli::{Cli, run};
use suisui_cli::config::CliConfig;
use suisui_cli::error::CliError;
use suisui_cli::logging::init_logging;

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level, cli.export().map(Into::into)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let mut stdout = io::stdout().lock();
    match run(&cli, &config, &mut stdout) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            error!(error = ?e, "command failed");
            ExitCode::FAILURE
        }
    }
}
