//! Command parsing and dispatch for the `suisui` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use serde::Serialize;
use suisui_patterns::{StepArg, StepDefinition, StepKeyword, parse_args, parse_segments};
use suisui_scenario::{StepCatalog, ValidationResult, parse_feature, validate_scenario};
use tracing::{debug, info};

use crate::config::{CliConfig, LogLevel};
use crate::output::{write_definition, write_json, write_match, write_segments, write_validation};

/// Inspect step patterns, step exports, and feature files.
#[derive(Parser, Debug)]
#[command(name = "suisui", author, version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the typed arguments derived from a pattern as JSON.
    Args {
        /// Step pattern in any supported grammar.
        pattern: String,
    },
    /// Print the display segments of a pattern.
    Segments {
        /// Step pattern in any supported grammar.
        pattern: String,
    },
    /// List the step definitions in the export.
    Steps(CatalogArgs),
    /// Resolve a step line against the export.
    Match {
        /// Step keyword (Given, When, Then, And, But).
        keyword: StepKeyword,
        /// Step text without its keyword.
        text: String,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Validate every scenario of a feature file.
    Validate {
        /// Path of the `.feature` file.
        feature: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Step-export JSON; defaults to `SUISUI_STEPS_EXPORT`.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// The `--export` flag of the selected command, if any.
    #[must_use]
    pub fn export(&self) -> Option<&Path> {
        match &self.command {
            Commands::Steps(catalog)
            | Commands::Match { catalog, .. }
            | Commands::Validate { catalog, .. } => catalog.export.as_deref(),
            Commands::Args { .. } | Commands::Segments { .. } => None,
        }
    }
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command completed and found nothing wrong.
    Success,
    /// `validate` found at least one error-severity issue.
    ValidationFailed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::ValidationFailed => Self::from(1),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchReport<'a> {
    resolved: bool,
    pattern: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition: Option<&'a StepDefinition>,
    args: &'a [StepArg],
}

#[derive(Serialize)]
struct ScenarioReport<'a> {
    scenario: &'a str,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Run the parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error when the step export or feature file cannot be read or
/// parsed, or when writing the output fails.
pub fn run(cli: &Cli, config: &CliConfig, out: &mut dyn Write) -> Result<Outcome> {
    match &cli.command {
        Commands::Args { pattern } => write_json(out, &parse_args(pattern))?,
        Commands::Segments { pattern } => write_segments(out, &parse_segments(pattern, &[]))?,
        Commands::Steps(args) => handle_steps(config, args.json, out)?,
        Commands::Match {
            keyword,
            text,
            catalog,
        } => handle_match(config, *keyword, text, catalog.json, out)?,
        Commands::Validate { feature, catalog } => {
            return handle_validate(config, feature, catalog.json, out);
        }
    }
    out.flush().wrap_err("failed to flush output")?;
    Ok(Outcome::Success)
}

fn load_catalog(config: &CliConfig) -> Result<StepCatalog> {
    let Some(path) = config.export.as_deref() else {
        debug!("no step export configured; using an empty catalog");
        return Ok(StepCatalog::empty());
    };
    StepCatalog::load(path)
        .wrap_err_with(|| format!("failed to load step export {}", path.display()))
}

fn handle_steps(config: &CliConfig, json: bool, out: &mut dyn Write) -> Result<()> {
    let catalog = load_catalog(config)?;
    if json {
        return write_json(out, catalog.definitions());
    }
    catalog
        .definitions()
        .iter()
        .try_for_each(|definition| write_definition(out, definition))
}

fn handle_match(
    config: &CliConfig,
    keyword: StepKeyword,
    text: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let found = catalog.resolve(keyword, text);
    if json {
        let report = MatchReport {
            resolved: found.is_resolved(),
            pattern: found.pattern(text.trim()),
            definition: found.definition,
            args: &found.args,
        };
        return write_json(out, &report);
    }
    write_match(out, &found)
}

fn handle_validate(
    config: &CliConfig,
    feature: &Path,
    json: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let catalog = load_catalog(config)?;
    let text = std::fs::read_to_string(feature)
        .wrap_err_with(|| format!("failed to read feature file {}", feature.display()))?;
    let document = parse_feature(&text, &catalog)
        .wrap_err_with(|| format!("failed to parse feature file {}", feature.display()))?;

    let results: Vec<_> = document
        .scenarios
        .iter()
        .map(|scenario| (scenario.name.as_str(), validate_scenario(scenario, Some(&catalog))))
        .collect();
    let failures = results.iter().filter(|(_, result)| !result.is_valid).count();
    info!(
        feature = %feature.display(),
        scenarios = results.len(),
        failures,
        "validated feature"
    );

    if json {
        let reports: Vec<_> = results
            .iter()
            .map(|(scenario, result)| ScenarioReport { scenario, result })
            .collect();
        write_json(out, &reports)?;
    } else {
        for (scenario, result) in &results {
            write_validation(out, scenario, result)?;
        }
    }
    out.flush().wrap_err("failed to flush output")?;

    Ok(if failures == 0 {
        Outcome::Success
    } else {
        Outcome::ValidationFailed
    })
}
