//! Step definitions discovered from the test-runner export.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::arg::{StepArg, parse_args};
use crate::errors::PatternError;
use crate::keyword::StepKeyword;
use crate::pattern::compile_regex_from_pattern;

/// A reusable, pattern-matched step.
///
/// Definitions are immutable once exported; `args` are canonical and always
/// unbound. The matcher regex is compiled from `pattern` on first use and
/// cached, so `pattern` must not change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    /// Stable identifier derived from keyword and pattern.
    pub id: String,
    /// Keyword the step is registered under.
    pub keyword: StepKeyword,
    /// Raw pattern: Cucumber expression, regex source, or outline text.
    pub pattern: String,
    /// Canonical unbound arguments.
    pub args: Vec<StepArg>,
    /// Source location reported by the exporter.
    #[serde(default)]
    pub location: String,
    /// Whether this is a built-in reusable step.
    #[serde(default)]
    pub is_generic: bool,
    #[serde(skip)]
    regex: OnceLock<Regex>,
}

// Equality ignores the cached matcher.
impl PartialEq for StepDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.keyword == other.keyword
            && self.pattern == other.pattern
            && self.args == other.args
            && self.location == other.location
            && self.is_generic == other.is_generic
    }
}

impl Eq for StepDefinition {}

impl StepDefinition {
    /// Build a definition, deriving its id and arguments from the pattern.
    ///
    /// # Examples
    /// ```
    /// use suisui_patterns::{StepDefinition, StepKeyword};
    ///
    /// let a = StepDefinition::new(StepKeyword::Given, "I am on the {string} page", "steps.ts:4");
    /// let b = StepDefinition::new(StepKeyword::Given, "I am on the {string} page", "other.ts:9");
    /// assert_eq!(a.id, b.id);
    /// assert_eq!(a.args.len(), 1);
    /// ```
    #[must_use]
    pub fn new(
        keyword: StepKeyword,
        pattern: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let pattern = pattern.into();
        Self {
            id: Self::derive_id(keyword, &pattern),
            keyword,
            args: parse_args(&pattern),
            pattern,
            location: location.into(),
            is_generic: false,
            regex: OnceLock::new(),
        }
    }

    /// Build a built-in generic definition.
    #[must_use]
    pub fn generic(keyword: StepKeyword, pattern: impl Into<String>) -> Self {
        Self {
            is_generic: true,
            ..Self::new(keyword, pattern, "")
        }
    }

    /// The compiled matcher regex for `pattern`, cached after the first
    /// successful compilation.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the generated regex cannot be compiled.
    pub fn matcher(&self) -> Result<&Regex, PatternError> {
        if let Some(regex) = self.regex.get() {
            return Ok(regex);
        }
        let regex = compile_regex_from_pattern(&self.pattern)?;
        Ok(self.regex.get_or_init(|| regex))
    }

    /// Deterministic identifier for a keyword and pattern pair.
    #[must_use]
    pub fn derive_id(keyword: StepKeyword, pattern: &str) -> String {
        let name = format!("{keyword}:{pattern}");
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::ArgType;

    #[test]
    fn id_depends_on_keyword_and_pattern() {
        let given = StepDefinition::new(StepKeyword::Given, "I log out", "");
        let then = StepDefinition::new(StepKeyword::Then, "I log out", "");
        let other = StepDefinition::new(StepKeyword::Given, "I log in", "");
        assert_ne!(given.id, then.id);
        assert_ne!(given.id, other.id);
        assert_eq!(given.id, StepDefinition::derive_id(StepKeyword::Given, "I log out"));
    }

    #[test]
    fn args_are_derived_and_unbound() {
        let def = StepDefinition::new(StepKeyword::When, "I select (small|large) size", "");
        assert_eq!(def.args.len(), 1);
        assert!(def.args.iter().all(|arg| arg.arg_type == ArgType::Enum && !arg.is_bound()));
    }

    #[test]
    fn generic_definitions_are_flagged() {
        let def = StepDefinition::generic(StepKeyword::Then, "I see {string}");
        assert!(def.is_generic);
        assert!(def.location.is_empty());
    }

    #[test]
    fn matcher_is_compiled_once_and_ignored_by_equality() {
        let def = StepDefinition::new(StepKeyword::When, "I wait {int} seconds", "");
        let fresh = def.clone();
        let (Ok(first), Ok(second)) = (def.matcher(), def.matcher()) else {
            panic!("pattern should compile");
        };
        assert!(std::ptr::eq(first, second));
        assert!(first.is_match("I wait 3 seconds"));
        assert_eq!(def, fresh);
    }

    #[test]
    fn round_trips_through_export_json() {
        let def = StepDefinition::new(StepKeyword::Given, "I fill <field>", "steps.ts:1");
        let json = serde_json::to_string(&def).unwrap_or_default();
        assert!(json.contains("\"isGeneric\":false"));
        let back: StepDefinition = match serde_json::from_str(&json) {
            Ok(back) => back,
            Err(err) => panic!("definition should deserialise: {err}"),
        };
        assert_eq!(back, def);
    }
}
