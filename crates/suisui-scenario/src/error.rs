//! Error types for the scenario store and its collaborators.

use thiserror::Error;

/// Errors raised while loading catalogs and documents or editing scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// No step with the given id exists in the scenario or its background.
    #[error("step not found: {0}")]
    StepNotFound(String),

    /// The step exists but has no argument with the given name.
    #[error("step {step_id} has no argument named '{name}'")]
    ArgumentNotFound {
        /// Id of the step that was searched.
        step_id: String,
        /// Requested argument name.
        name: String,
    },

    /// A positional index was past the end of the step list.
    #[error("index {index} is out of range for {len} steps")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current number of steps.
        len: usize,
    },

    /// The feature has no scenario at the requested position.
    #[error("feature has no scenario at index {0}")]
    ScenarioNotFound(usize),

    /// Gherkin text could not be parsed.
    #[error("failed to parse feature: {0}")]
    Feature(#[from] gherkin::ParseError),

    /// A step export could not be decoded.
    #[error("invalid step export: {0}")]
    Export(#[from] serde_json::Error),

    /// An I/O error occurred while reading an export or feature file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_not_found_displays_id() {
        let error = ScenarioError::StepNotFound("abc".into());
        assert_eq!(error.to_string(), "step not found: abc");
    }

    #[test]
    fn argument_not_found_displays_step_and_name() {
        let error = ScenarioError::ArgumentNotFound {
            step_id: "s1".into(),
            name: "arg0".into(),
        };
        assert_eq!(error.to_string(), "step s1 has no argument named 'arg0'");
    }

    #[test]
    fn index_out_of_range_displays_bounds() {
        let error = ScenarioError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(error.to_string(), "index 4 is out of range for 2 steps");
    }

    #[test]
    fn io_error_converts_from_std_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing export");
        let error: ScenarioError = io_err.into();
        assert!(error.to_string().contains("missing export"));
    }
}
