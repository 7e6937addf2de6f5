//! Scenario validation.
//!
//! Errors block a run; warnings are advisory. Issues are reported in a
//! stable order: scenario-level errors, then per-step issues in step order
//! (background first), then keyword and Examples warnings.

use serde::{Deserialize, Serialize};
use suisui_patterns::{
    ArgType, PlaceholderKind, PlaceholderSyntax, Segment, StepKeyword, lex_pattern,
};
use tracing::debug;

use crate::catalog::StepCatalog;
use crate::scenario::Scenario;
use crate::step::ScenarioStep;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The scenario cannot run as written.
    Error,
    /// The scenario runs but is probably incomplete.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// The offending step, when the issue concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
}

impl ValidationIssue {
    fn error(message: impl Into<String>, step_id: Option<&str>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            step_id: step_id.map(str::to_owned),
        }
    }

    fn warning(message: impl Into<String>, step_id: Option<&str>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            step_id: step_id.map(str::to_owned),
        }
    }
}

/// Outcome of validating one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no issue has error severity.
    pub is_valid: bool,
    /// All findings in report order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let is_valid = !issues.iter().any(|issue| issue.severity == Severity::Error);
        Self { is_valid, issues }
    }

    /// Issues with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Issues with warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Names of the `<name>` variables appearing in `text`.
fn outline_variables(text: &str) -> Vec<String> {
    lex_pattern(text)
        .iter()
        .filter_map(|token| match token.as_placeholder().map(|p| &p.kind) {
            Some(PlaceholderKind::OutlineVariable { name }) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

fn check_arguments(step: &ScenarioStep, issues: &mut Vec<ValidationIssue>) {
    let id = Some(step.id.as_str());
    for segment in step.segments() {
        let Segment::Arg {
            arg,
            syntax,
            source,
        } = segment
        else {
            continue;
        };
        let value = arg.value.trim();
        if value.is_empty() {
            if arg.required && syntax != PlaceholderSyntax::OutlineVariable {
                issues.push(ValidationIssue::error(
                    format!("Missing required argument: {}", arg.name),
                    id,
                ));
            }
            continue;
        }
        // Placeholder text kept from an unrecognised line is not a value.
        if value == source || !outline_variables(value).is_empty() {
            continue;
        }
        match arg.arg_type {
            ArgType::Int if value.parse::<i64>().is_err() => issues.push(ValidationIssue::error(
                format!("Argument \"{}\" must be an integer", arg.name),
                id,
            )),
            ArgType::Float if value.parse::<f64>().is_err() => issues.push(ValidationIssue::error(
                format!("Argument \"{}\" must be a number", arg.name),
                id,
            )),
            _ => {}
        }
    }
}

fn check_defined(step: &ScenarioStep, catalog: &StepCatalog, issues: &mut Vec<ValidationIssue>) {
    let text = step.text();
    if catalog.resolve(step.keyword, &text).definition.is_none() {
        issues.push(ValidationIssue::warning(
            format!("Undefined step: {} {text}", step.keyword),
            Some(&step.id),
        ));
    }
}

fn check_examples(scenario: &Scenario, issues: &mut Vec<ValidationIssue>) {
    let Some(examples) = scenario.examples.as_ref() else {
        return;
    };
    let mut reported: Vec<String> = Vec::new();
    for step in scenario.all_steps() {
        for name in outline_variables(&step.text()) {
            if examples.has_column(&name) || reported.contains(&name) {
                continue;
            }
            issues.push(ValidationIssue::warning(
                format!("Placeholder <{name}> has no matching Examples column"),
                Some(&step.id),
            ));
            reported.push(name);
        }
    }
}

/// Validate a scenario, optionally checking its steps against a catalog.
///
/// Undefined-step warnings are only produced for a non-empty catalog, so a
/// scenario can be validated before the first step export completes.
///
/// # Examples
/// ```
/// use suisui_scenario::{Scenario, validate_scenario};
///
/// let result = validate_scenario(&Scenario::new(""), None);
/// assert!(!result.is_valid);
/// assert_eq!(
///     result.errors().map(|i| i.message.as_str()).collect::<Vec<_>>(),
///     ["Scenario name is required", "Scenario must have at least one step"],
/// );
/// ```
#[must_use]
pub fn validate_scenario(scenario: &Scenario, catalog: Option<&StepCatalog>) -> ValidationResult {
    let mut issues = Vec::new();

    if scenario.name.trim().is_empty() {
        issues.push(ValidationIssue::error("Scenario name is required", None));
    }
    if scenario.steps.is_empty() {
        issues.push(ValidationIssue::error(
            "Scenario must have at least one step",
            None,
        ));
    }

    let catalog = catalog.filter(|catalog| !catalog.is_empty());
    for step in scenario.all_steps() {
        check_arguments(step, &mut issues);
        if let Some(catalog) = catalog {
            check_defined(step, catalog, &mut issues);
        }
    }

    if !scenario.all_steps().any(|step| step.is(StepKeyword::Given)) {
        issues.push(ValidationIssue::warning("Scenario has no Given step", None));
    }
    if !scenario.steps.iter().any(|step| step.is(StepKeyword::Then)) {
        issues.push(ValidationIssue::warning("Scenario has no Then step", None));
    }
    check_examples(scenario, &mut issues);

    let result = ValidationResult::from_issues(issues);
    debug!(
        scenario = %scenario.name,
        valid = result.is_valid,
        issues = result.issues.len(),
        "validated scenario"
    );
    result
}
