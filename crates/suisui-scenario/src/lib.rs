//! Scenario store for SuiSui.
//!
//! Holds the scenario being edited, keeps its steps reconciled with their
//! patterns, and moves scenarios in and out of Gherkin text. The step
//! catalog is an immutable snapshot passed to each operation that needs it.

mod catalog;
mod error;
mod feature;
mod scenario;
mod step;
mod store;
mod validation;

pub use catalog::StepCatalog;
pub use error::ScenarioError;
pub use feature::{FeatureDocument, parse_feature, render_feature};
pub use scenario::{ExamplesTable, Scenario};
pub use step::ScenarioStep;
pub use store::ScenarioStore;
pub use validation::{Severity, ValidationIssue, ValidationResult, validate_scenario};
