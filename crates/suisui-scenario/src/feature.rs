//! Reading and writing Gherkin feature text.
//!
//! Parsing feeds every step line through the catalog so existing features
//! open as editable steps. Rendering writes the steps back with the same
//! values, so a parse of the rendered text yields the same document.
//! Rules are flattened into the feature's scenario list; step tables and
//! docstrings are not carried.

use std::iter;

use gherkin::GherkinEnv;
use suisui_patterns::StepKeyword;
use tracing::{debug, info};

use crate::catalog::StepCatalog;
use crate::error::ScenarioError;
use crate::scenario::{ExamplesTable, Scenario};
use crate::step::ScenarioStep;

const INDENT: &str = "  ";

/// A parsed `.feature` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureDocument {
    /// Feature title.
    pub name: String,
    /// Free text below the title.
    pub description: Option<String>,
    /// Feature tags without the leading `@`.
    pub tags: Vec<String>,
    /// Feature background, also copied into each scenario.
    pub background: Vec<ScenarioStep>,
    /// Scenarios and outlines in file order.
    pub scenarios: Vec<Scenario>,
}

fn normalise_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim_start_matches('@').to_owned())
        .collect()
}

fn resolve_steps(steps: &[gherkin::Step], catalog: &StepCatalog) -> Vec<ScenarioStep> {
    steps
        .iter()
        .map(|step| ScenarioStep::resolve(StepKeyword::from(step.ty), &step.value, catalog))
        .collect()
}

fn is_outline(scenario: &gherkin::Scenario) -> bool {
    scenario.keyword.contains("Outline")
        || scenario.keyword.contains("Template")
        || !scenario.examples.is_empty()
}

/// Merge all `Examples:` blocks sharing the first block's header row.
fn collect_examples(scenario: &gherkin::Scenario) -> Option<ExamplesTable> {
    let mut tables = scenario
        .examples
        .iter()
        .filter_map(|examples| examples.table.as_ref())
        .filter_map(|table| ExamplesTable::from_rows(table.rows.clone()));
    let mut merged = tables.next()?;
    for table in tables {
        if table.headers == merged.headers {
            merged.rows.extend(table.rows);
        } else {
            debug!(scenario = %scenario.name, "skipping Examples block with different headers");
        }
    }
    Some(merged)
}

fn convert_scenario(
    scenario: &gherkin::Scenario,
    background: &[ScenarioStep],
    catalog: &StepCatalog,
) -> Scenario {
    let examples = if is_outline(scenario) {
        Some(collect_examples(scenario).unwrap_or_default())
    } else {
        None
    };
    Scenario {
        name: scenario.name.clone(),
        tags: normalise_tags(&scenario.tags),
        steps: resolve_steps(&scenario.steps, catalog),
        background: background.to_vec(),
        examples,
    }
}

/// Parse Gherkin text, resolving each step line against `catalog`.
///
/// # Errors
///
/// Returns [`ScenarioError::Feature`] when the text is not valid Gherkin.
///
/// # Examples
/// ```
/// use suisui_scenario::{StepCatalog, parse_feature};
///
/// let text = "Feature: Login\n  Scenario: Admin\n    Given I log in as <role>\n";
/// let document = parse_feature(text, &StepCatalog::empty())?;
/// assert_eq!(document.scenarios.len(), 1);
/// # Ok::<(), suisui_scenario::ScenarioError>(())
/// ```
pub fn parse_feature(text: &str, catalog: &StepCatalog) -> Result<FeatureDocument, ScenarioError> {
    let mut source = text.to_owned();
    if !source.ends_with('\n') {
        source.push('\n');
    }
    let feature = gherkin::Feature::parse(source.as_str(), GherkinEnv::default())?;

    let background = feature
        .background
        .as_ref()
        .map(|background| resolve_steps(&background.steps, catalog))
        .unwrap_or_default();

    let mut scenarios: Vec<Scenario> = feature
        .scenarios
        .iter()
        .map(|scenario| convert_scenario(scenario, &background, catalog))
        .collect();

    for rule in &feature.rules {
        let mut rule_background = background.clone();
        if let Some(extra) = rule.background.as_ref() {
            rule_background.extend(resolve_steps(&extra.steps, catalog));
        }
        scenarios.extend(
            rule.scenarios
                .iter()
                .map(|scenario| convert_scenario(scenario, &rule_background, catalog)),
        );
    }

    info!(
        feature = %feature.name,
        scenarios = scenarios.len(),
        background = background.len(),
        "parsed feature"
    );
    Ok(FeatureDocument {
        name: feature.name.clone(),
        description: feature.description.clone(),
        tags: normalise_tags(&feature.tags),
        background,
        scenarios,
    })
}

fn push_tags(lines: &mut Vec<String>, tags: &[String], indent: &str) {
    if tags.is_empty() {
        return;
    }
    let joined: Vec<String> = tags.iter().map(|tag| format!("@{tag}")).collect();
    lines.push(format!("{indent}{}", joined.join(" ")));
}

fn push_steps(lines: &mut Vec<String>, steps: &[ScenarioStep], indent: &str) {
    let mut previous = None;
    for step in steps {
        let keyword = if previous == Some(step.keyword) {
            StepKeyword::And.as_str()
        } else {
            step.keyword.as_str()
        };
        previous = Some(step.keyword);
        lines.push(format!("{indent}{keyword} {}", step.text()));
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn push_table(lines: &mut Vec<String>, table: &ExamplesTable, indent: &str) {
    let rows: Vec<Vec<String>> = iter::once(&table.headers)
        .chain(&table.rows)
        .map(|row| row.iter().map(|cell| escape_cell(cell)).collect())
        .collect();
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    for row in &rows {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(column, width)| {
                let cell = row.get(column).map_or("", String::as_str);
                format!(" {cell:<width$} ")
            })
            .collect();
        lines.push(format!("{indent}|{}|", cells.join("|")));
    }
}

fn push_scenario(lines: &mut Vec<String>, scenario: &Scenario) {
    let step_indent = INDENT.repeat(2);
    lines.push(String::new());
    push_tags(lines, &scenario.tags, INDENT);
    let keyword = if scenario.is_outline() {
        "Scenario Outline"
    } else {
        "Scenario"
    };
    lines.push(format!("{INDENT}{keyword}: {}", scenario.name));
    push_steps(lines, &scenario.steps, &step_indent);
    if let Some(examples) = scenario.examples.as_ref().filter(|e| !e.headers.is_empty()) {
        lines.push(String::new());
        lines.push(format!("{step_indent}Examples:"));
        push_table(lines, examples, &INDENT.repeat(3));
    }
}

/// Write a document as Gherkin text.
///
/// Consecutive steps with the same keyword are written as `And`.
#[must_use]
pub fn render_feature(document: &FeatureDocument) -> String {
    let mut lines = Vec::new();
    push_tags(&mut lines, &document.tags, "");
    lines.push(format!("Feature: {}", document.name));
    if let Some(description) = document
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        lines.extend(
            description
                .lines()
                .map(|line| format!("{INDENT}{}", line.trim())),
        );
    }
    if !document.background.is_empty() {
        lines.push(String::new());
        lines.push(format!("{INDENT}Background:"));
        push_steps(&mut lines, &document.background, &INDENT.repeat(2));
    }
    for scenario in &document.scenarios {
        push_scenario(&mut lines, scenario);
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
