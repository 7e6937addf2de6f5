//! The editable scenario behind the visual step editor.
//!
//! All mutations go through [`ScenarioStore`] so steps are always
//! reconciled against their patterns and addressed by id, whether they live
//! in the scenario body or the background.

use suisui_patterns::{StepDefinition, StepKeyword};
use tracing::{debug, info};

use crate::catalog::StepCatalog;
use crate::error::ScenarioError;
use crate::feature::{FeatureDocument, parse_feature, render_feature};
use crate::scenario::Scenario;
use crate::step::ScenarioStep;
use crate::validation::{ValidationResult, validate_scenario};

/// Owner of the scenario currently being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioStore {
    scenario: Scenario,
}

impl ScenarioStore {
    /// A store holding an empty scenario called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_scenario(Scenario::new(name))
    }

    /// Take ownership of an existing scenario, reconciling its steps.
    #[must_use]
    pub fn from_scenario(scenario: Scenario) -> Self {
        let mut store = Self { scenario };
        store.reconcile();
        store
    }

    /// The scenario under edit.
    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Give the scenario back to the caller.
    #[must_use]
    pub fn into_scenario(self) -> Scenario {
        self.scenario
    }

    /// Rename the scenario.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.scenario.name = name.into();
    }

    /// Replace the scenario tags.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.scenario.tags = tags;
    }

    /// Append a step instantiated from `definition`, returning its id.
    pub fn add_step(&mut self, definition: &StepDefinition) -> String {
        let len = self.scenario.steps.len();
        self.insert_at(len, ScenarioStep::from_definition(definition))
    }

    /// Insert a step instantiated from `definition` before `index`,
    /// returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::IndexOutOfRange`] when `index` is past the
    /// end of the step list.
    pub fn insert_step(
        &mut self,
        index: usize,
        definition: &StepDefinition,
    ) -> Result<String, ScenarioError> {
        let len = self.scenario.steps.len();
        if index > len {
            return Err(ScenarioError::IndexOutOfRange { index, len });
        }
        Ok(self.insert_at(index, ScenarioStep::from_definition(definition)))
    }

    /// Append a step typed as Gherkin text, resolved against `catalog`.
    ///
    /// `And`/`But` continue the keyword of the last step.
    pub fn add_step_text(
        &mut self,
        keyword: StepKeyword,
        text: &str,
        catalog: &StepCatalog,
    ) -> String {
        let previous = self.scenario.steps.last().map(|step| step.keyword);
        let keyword = match (keyword.is_conjunction(), previous) {
            (true, Some(previous)) => previous,
            _ => keyword,
        };
        let len = self.scenario.steps.len();
        self.insert_at(len, ScenarioStep::resolve(keyword, text, catalog))
    }

    fn insert_at(&mut self, index: usize, step: ScenarioStep) -> String {
        debug!(step_id = %step.id, pattern = %step.pattern, index, "adding step");
        let id = step.id.clone();
        self.scenario.steps.insert(index, step);
        id
    }

    /// Append a background step instantiated from `definition`, returning
    /// its id.
    pub fn add_background_step(&mut self, definition: &StepDefinition) -> String {
        let step = ScenarioStep::from_definition(definition);
        debug!(step_id = %step.id, pattern = %step.pattern, "adding background step");
        let id = step.id.clone();
        self.scenario.background.push(step);
        id
    }

    /// Remove a step from the scenario or background.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::StepNotFound`] for an unknown id.
    pub fn remove_step(&mut self, id: &str) -> Result<ScenarioStep, ScenarioError> {
        for list in [&mut self.scenario.steps, &mut self.scenario.background] {
            if let Some(index) = list.iter().position(|step| step.id == id) {
                debug!(step_id = id, "removing step");
                return Ok(list.remove(index));
            }
        }
        Err(ScenarioError::StepNotFound(id.to_owned()))
    }

    /// Move a step to `to_index` within its own list.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::StepNotFound`] for an unknown id and
    /// [`ScenarioError::IndexOutOfRange`] when `to_index` does not address
    /// an existing position.
    pub fn move_step(&mut self, id: &str, to_index: usize) -> Result<(), ScenarioError> {
        for list in [&mut self.scenario.steps, &mut self.scenario.background] {
            let Some(from) = list.iter().position(|step| step.id == id) else {
                continue;
            };
            if to_index >= list.len() {
                return Err(ScenarioError::IndexOutOfRange {
                    index: to_index,
                    len: list.len(),
                });
            }
            let step = list.remove(from);
            list.insert(to_index, step);
            debug!(step_id = id, from, to = to_index, "moved step");
            return Ok(());
        }
        Err(ScenarioError::StepNotFound(id.to_owned()))
    }

    /// Set the value of argument `name` on step `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::StepNotFound`] for an unknown step and
    /// [`ScenarioError::ArgumentNotFound`] when the step has no such
    /// argument.
    pub fn update_step_arg(
        &mut self,
        id: &str,
        name: &str,
        value: impl Into<String>,
        enum_values: Option<Vec<String>>,
    ) -> Result<(), ScenarioError> {
        let step = self
            .scenario
            .step_mut(id)
            .ok_or_else(|| ScenarioError::StepNotFound(id.to_owned()))?;
        if step.set_arg_value(name, value, enum_values) {
            Ok(())
        } else {
            Err(ScenarioError::ArgumentNotFound {
                step_id: id.to_owned(),
                name: name.to_owned(),
            })
        }
    }

    /// Refresh every step's arguments from its pattern.
    pub fn reconcile(&mut self) {
        self.scenario
            .background
            .iter_mut()
            .chain(self.scenario.steps.iter_mut())
            .for_each(ScenarioStep::reconcile);
    }

    /// Remove all steps, keeping the name and tags.
    pub fn clear(&mut self) {
        self.scenario.steps.clear();
        self.scenario.background.clear();
        self.scenario.examples = None;
    }

    /// Replace the scenario with scenario `index` of a feature file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Feature`] for invalid Gherkin and
    /// [`ScenarioError::ScenarioNotFound`] when the feature has fewer
    /// scenarios.
    pub fn load_feature_text(
        &mut self,
        text: &str,
        index: usize,
        catalog: &StepCatalog,
    ) -> Result<(), ScenarioError> {
        let document = parse_feature(text, catalog)?;
        let scenario = document
            .scenarios
            .into_iter()
            .nth(index)
            .ok_or(ScenarioError::ScenarioNotFound(index))?;
        info!(scenario = %scenario.name, steps = scenario.steps.len(), "loaded scenario");
        self.scenario = scenario;
        self.reconcile();
        Ok(())
    }

    /// Write the scenario as a single-scenario feature.
    #[must_use]
    pub fn to_feature_text(&self, feature_name: &str) -> String {
        let mut scenario = self.scenario.clone();
        let background = std::mem::take(&mut scenario.background);
        render_feature(&FeatureDocument {
            name: feature_name.to_owned(),
            background,
            scenarios: vec![scenario],
            ..FeatureDocument::default()
        })
    }

    /// Validate the scenario.
    #[must_use]
    pub fn validate(&self, catalog: Option<&StepCatalog>) -> ValidationResult {
        validate_scenario(&self.scenario, catalog)
    }
}
