//! Scenario and Scenario Outline data.

use serde::{Deserialize, Serialize};

use crate::step::ScenarioStep;

/// The `Examples:` table of a Scenario Outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplesTable {
    /// Column names, matched against `<name>` variables in step text.
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`.
    pub rows: Vec<Vec<String>>,
}

impl ExamplesTable {
    /// Split a parsed table into its header row and data rows.
    ///
    /// Returns `None` for a table without rows.
    #[must_use]
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let headers = rows.remove(0);
        Some(Self { headers, rows })
    }

    /// Whether a column called `name` exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }
}

/// A scenario under edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario title.
    pub name: String,
    /// Tags without the leading `@`.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Steps in execution order.
    pub steps: Vec<ScenarioStep>,
    /// Background steps run before `steps`.
    #[serde(default)]
    pub background: Vec<ScenarioStep>,
    /// Examples of a Scenario Outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesTable>,
}

impl Scenario {
    /// An empty scenario called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether this is a Scenario Outline.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        self.examples.is_some()
    }

    /// Background steps followed by scenario steps.
    pub fn all_steps(&self) -> impl Iterator<Item = &ScenarioStep> {
        self.background.iter().chain(&self.steps)
    }

    /// Find a step in the scenario or its background.
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&ScenarioStep> {
        self.all_steps().find(|step| step.id == id)
    }

    /// Mutable variant of [`Scenario::step`].
    pub fn step_mut(&mut self, id: &str) -> Option<&mut ScenarioStep> {
        self.background
            .iter_mut()
            .chain(self.steps.iter_mut())
            .find(|step| step.id == id)
    }
}
