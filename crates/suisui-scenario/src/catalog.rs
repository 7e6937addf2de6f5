//! Immutable snapshot of the step definitions exported by the test runner.
//!
//! The snapshot is passed explicitly to every operation that needs it; there
//! is no process-wide catalog. Callers decide when an export is stale and
//! replace the snapshot wholesale.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use suisui_patterns::{
    StepArg, StepDefinition, StepKeyword, StepMatch, find_best_match, reconcile_args,
};
use tracing::{debug, info};

use crate::error::ScenarioError;

/// One record of a step export as written by the exporter.
///
/// Exporters may omit `id` and `args`; both are derived from the pattern.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord {
    #[serde(default)]
    id: Option<String>,
    keyword: StepKeyword,
    pattern: String,
    #[serde(default)]
    args: Option<Vec<StepArg>>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    is_generic: bool,
}

impl From<ExportRecord> for StepDefinition {
    fn from(record: ExportRecord) -> Self {
        let mut definition = Self::new(record.keyword, record.pattern, record.location);
        if let Some(id) = record.id.filter(|id| !id.is_empty()) {
            definition.id = id;
        }
        if let Some(args) = record.args {
            definition.args = reconcile_args(&definition.pattern, &args)
                .into_iter()
                .map(|arg| arg.with_value(""))
                .collect();
        }
        definition.is_generic = record.is_generic;
        definition
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportSnapshot {
    #[serde(default)]
    steps: Vec<ExportRecord>,
    #[serde(default)]
    exported_at: Option<DateTime<Utc>>,
}

impl From<ExportSnapshot> for StepCatalog {
    fn from(snapshot: ExportSnapshot) -> Self {
        Self::new(
            snapshot.steps.into_iter().map(StepDefinition::from).collect(),
            snapshot.exported_at,
        )
    }
}

/// Step definitions together with the time they were exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ExportSnapshot")]
pub struct StepCatalog {
    steps: Vec<StepDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_at: Option<DateTime<Utc>>,
}

impl StepCatalog {
    /// Wrap a list of definitions exported at `exported_at`.
    #[must_use]
    pub fn new(steps: Vec<StepDefinition>, exported_at: Option<DateTime<Utc>>) -> Self {
        Self { steps, exported_at }
    }

    /// A catalog with no definitions, used before the first export completes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode an export document.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Export`] when the JSON is malformed or a
    /// record lacks its keyword or pattern.
    ///
    /// # Examples
    /// ```
    /// use suisui_scenario::StepCatalog;
    ///
    /// let catalog = StepCatalog::from_json(
    ///     r#"{"steps":[{"keyword":"Given","pattern":"I am on the {string} page"}]}"#,
    /// )?;
    /// assert_eq!(catalog.len(), 1);
    /// # Ok::<(), suisui_scenario::ScenarioError>(())
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let catalog: Self = serde_json::from_str(text)?;
        debug!(steps = catalog.len(), "decoded step export");
        Ok(catalog)
    }

    /// Decode an export document from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Export`] when the JSON is malformed.
    pub fn from_reader(reader: impl Read) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read an export document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] when the file cannot be read and
    /// [`ScenarioError::Export`] when it is not a valid export.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        info!(path = %path.display(), steps = catalog.len(), "loaded step export");
        Ok(catalog)
    }

    /// Encode the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Export`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All definitions in export order.
    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// When the export was produced, if the exporter recorded it.
    #[must_use]
    pub fn exported_at(&self) -> Option<DateTime<Utc>> {
        self.exported_at
    }

    /// Definitions a step written with `keyword` may resolve to.
    pub fn for_keyword(&self, keyword: StepKeyword) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter().filter(move |d| keyword.accepts(d.keyword))
    }

    /// Look a definition up by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|d| d.id == id)
    }

    /// Resolve step text against this snapshot.
    #[must_use]
    pub fn resolve(&self, keyword: StepKeyword, text: &str) -> StepMatch<'_> {
        find_best_match(text, keyword, &self.steps)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the snapshot holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
