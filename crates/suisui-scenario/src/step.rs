//! Steps placed in a scenario or background.

use serde::{Deserialize, Serialize};
use suisui_patterns::{
    PlaceholderSyntax, Segment, StepArg, StepDefinition, StepKeyword, parse_segments,
    reconcile_args, render_step_text,
};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::StepCatalog;

/// A step instance with its own bound argument values.
///
/// The pattern is copied from the originating definition when the step is
/// added, so later catalog changes never rewrite existing scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioStep {
    /// Unique per instance.
    pub id: String,
    /// Resolved keyword (`And`/`But` are stored as the keyword they continue).
    pub keyword: StepKeyword,
    /// Pattern copied from the definition, or the step text when unresolved.
    pub pattern: String,
    /// Argument values for this instance.
    pub args: Vec<StepArg>,
}

fn new_step_id() -> String {
    Uuid::new_v4().to_string()
}

/// Arguments for text no definition matched. `<name>` variables stay
/// unbound; any other placeholder-shaped token is bound to its own source so
/// the text renders back unchanged.
fn literal_args(text: &str) -> Vec<StepArg> {
    parse_segments(text, &[])
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Arg {
                arg,
                syntax: PlaceholderSyntax::OutlineVariable,
                ..
            } => Some(arg),
            Segment::Arg { arg, source, .. } => Some(arg.with_value(source)),
            Segment::Text { .. } => None,
        })
        .collect()
}

impl ScenarioStep {
    /// Create a step from raw parts, reconciling `args` against `pattern`.
    #[must_use]
    pub fn new(keyword: StepKeyword, pattern: impl Into<String>, args: &[StepArg]) -> Self {
        let pattern = pattern.into();
        let args = reconcile_args(&pattern, args);
        Self {
            id: new_step_id(),
            keyword,
            pattern,
            args,
        }
    }

    /// Instantiate a catalog definition with unbound arguments.
    #[must_use]
    pub fn from_definition(definition: &StepDefinition) -> Self {
        Self::new(definition.keyword, definition.pattern.clone(), &definition.args)
    }

    /// Interpret a Gherkin step line (keyword already stripped) against the
    /// catalog.
    ///
    /// An unmatched line keeps its text as the pattern. Its outline variables
    /// are unbound arguments; `{..}` and `(a|b)` tokens in it are bound to
    /// their own text, so [`text`](Self::text) reproduces the line.
    ///
    /// # Examples
    /// ```
    /// use suisui_patterns::{StepDefinition, StepKeyword};
    /// use suisui_scenario::{ScenarioStep, StepCatalog};
    ///
    /// let catalog = StepCatalog::new(
    ///     vec![StepDefinition::new(StepKeyword::When, "I wait {int} seconds", "")],
    ///     None,
    /// );
    /// let step = ScenarioStep::resolve(StepKeyword::When, "I wait 5 seconds", &catalog);
    /// assert_eq!(step.pattern, "I wait {int} seconds");
    /// assert_eq!(step.text(), "I wait 5 seconds");
    /// ```
    #[must_use]
    pub fn resolve(keyword: StepKeyword, text: &str, catalog: &StepCatalog) -> Self {
        let text = text.trim();
        let found = catalog.resolve(keyword, text);
        let Some(definition) = found.definition else {
            debug!(%keyword, text, "step text left unresolved");
            return Self {
                id: new_step_id(),
                keyword,
                pattern: text.to_owned(),
                args: literal_args(text),
            };
        };
        let keyword = if keyword.is_conjunction() {
            definition.keyword
        } else {
            keyword
        };
        Self {
            id: new_step_id(),
            keyword,
            pattern: definition.pattern.clone(),
            args: found.args,
        }
    }

    /// The Gherkin step line without its keyword.
    #[must_use]
    pub fn text(&self) -> String {
        render_step_text(&self.pattern, &self.args)
    }

    /// Display segments for the step editor.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        parse_segments(&self.pattern, &self.args)
    }

    /// Look an argument up by name.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&StepArg> {
        self.args.iter().find(|arg| arg.name == name)
    }

    /// Bind `value` to the argument called `name`, optionally replacing its
    /// enum options. Returns `false` when no such argument exists.
    pub fn set_arg_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
        enum_values: Option<Vec<String>>,
    ) -> bool {
        let Some(arg) = self.args.iter_mut().find(|arg| arg.name == name) else {
            return false;
        };
        arg.value = value.into();
        if let Some(options) = enum_values {
            arg.enum_values = options;
        }
        true
    }

    /// Refresh the stored arguments from the pattern, keeping values.
    ///
    /// Running this on an already reconciled step changes nothing.
    pub fn reconcile(&mut self) {
        self.args = reconcile_args(&self.pattern, &self.args);
    }

    /// Whether the step was resolved to `keyword`.
    #[must_use]
    pub fn is(&self, keyword: StepKeyword) -> bool {
        self.keyword == keyword
    }
}
