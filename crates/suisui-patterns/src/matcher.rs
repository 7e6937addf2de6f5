//! Best-match resolution of free Gherkin step text against a catalog of step
//! definitions.
//!
//! Each candidate pattern is compiled with a lazy wildcard per placeholder
//! and must match the whole step text. Among matching candidates the most
//! specific wins (see [`SpecificityScore`]); equally specific candidates keep
//! catalog order. When nothing matches, `<name>` tokens in the step text are
//! extracted so Scenario Outline steps stay editable.

use tracing::debug;

use crate::arg::{ArgType, StepArg};
use crate::capture::{capture_values, unquote};
use crate::definition::StepDefinition;
use crate::keyword::StepKeyword;
use crate::pattern::lexer::placeholders;
use crate::pattern::{PlaceholderKind, lex_pattern};
use crate::segment::{Segment, is_echo, is_quoted_source, parse_segments};
use crate::specificity::SpecificityScore;

/// Result of resolving step text against a catalog.
///
/// A missing `definition` signals an unrecognised step; `args` then hold
/// any outline variables found in the text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatch<'a> {
    /// The matched definition, if any.
    pub definition: Option<&'a StepDefinition>,
    /// Arguments bound to the values captured from the step text.
    pub args: Vec<StepArg>,
}

impl<'a> StepMatch<'a> {
    /// Whether a catalog definition matched.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.definition.is_some()
    }

    /// The pattern a scenario step should store: the definition's pattern,
    /// or the step text itself when unresolved.
    #[must_use]
    pub fn pattern<'t>(&self, step_text: &'t str) -> &'t str
    where
        'a: 't,
    {
        self.definition
            .map_or(step_text, |definition| definition.pattern.as_str())
    }
}

fn captures_for(definition: &StepDefinition, text: &str) -> Option<Vec<String>> {
    let regex = match definition.matcher() {
        Ok(regex) => regex,
        Err(err) => {
            debug!(id = %definition.id, error = %err, "skipping uncompilable step definition");
            return None;
        }
    };
    capture_values(regex, text)
}

/// Bind captured values to the reconciled arguments of `pattern`.
///
/// A capture that repeats its placeholder's source text (an unfilled slot
/// written back as `<name>`, `(a|b)` or `{int}`) binds as unbound.
fn bind_values(pattern: &str, args: &[StepArg], values: &[String]) -> Vec<StepArg> {
    parse_segments(pattern, args)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Arg { arg, source, .. } => Some((arg, source)),
            Segment::Text { .. } => None,
        })
        .zip(values)
        .map(|((arg, source), raw)| {
            let value = if is_echo(raw, &source) {
                ""
            } else if is_quoted_source(&source) {
                unquote(raw)
            } else {
                raw.as_str()
            };
            arg.with_value(value)
        })
        .collect()
}

/// Extract `<name>` variables from step text that matched no definition.
fn outline_args(step_text: &str) -> Vec<StepArg> {
    let tokens = lex_pattern(step_text);
    placeholders(&tokens)
        .filter_map(|placeholder| match &placeholder.kind {
            PlaceholderKind::OutlineVariable { name } => {
                Some(StepArg::new(name.clone(), ArgType::String))
            }
            _ => None,
        })
        .collect()
}

/// Find the catalog definition matching `step_text` (keyword already
/// stripped) and bind its arguments.
///
/// Only definitions whose keyword `keyword` [accepts](StepKeyword::accepts)
/// are considered. Never fails: an empty catalog or no match yields an
/// unresolved [`StepMatch`].
///
/// # Examples
/// ```
/// use suisui_patterns::{StepDefinition, StepKeyword, find_best_match};
///
/// let catalog = vec![StepDefinition::new(StepKeyword::Given, "I am on the {string} page", "")];
/// let found = find_best_match(r#"I am on the "dashboard" page"#, StepKeyword::Given, &catalog);
/// assert_eq!(found.definition.map(|d| d.id.as_str()), catalog.first().map(|d| d.id.as_str()));
/// assert_eq!(found.args.first().map(|a| a.value.as_str()), Some("dashboard"));
///
/// let outline = find_best_match("I login as <role>", StepKeyword::Given, &[]);
/// assert!(outline.definition.is_none());
/// assert_eq!(outline.args.first().map(|a| a.name.as_str()), Some("role"));
/// ```
#[must_use]
pub fn find_best_match<'a>(
    step_text: &str,
    keyword: StepKeyword,
    catalog: &'a [StepDefinition],
) -> StepMatch<'a> {
    let text = step_text.trim();
    let mut best: Option<(SpecificityScore, &'a StepDefinition, Vec<String>)> = None;

    for definition in catalog.iter().filter(|d| keyword.accepts(d.keyword)) {
        let Some(values) = captures_for(definition, text) else {
            continue;
        };
        let score = SpecificityScore::calculate(&definition.pattern);
        if best.as_ref().is_none_or(|(current, ..)| score > *current) {
            best = Some((score, definition, values));
        }
    }

    match best {
        Some((_, definition, values)) => {
            debug!(id = %definition.id, pattern = %definition.pattern, "resolved step text");
            StepMatch {
                definition: Some(definition),
                args: bind_values(&definition.pattern, &definition.args, &values),
            }
        }
        None => {
            debug!(text, %keyword, "no step definition matched; extracting outline variables");
            StepMatch {
                definition: None,
                args: outline_args(text),
            }
        }
    }
}
