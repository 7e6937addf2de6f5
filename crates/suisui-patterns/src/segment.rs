//! Segment builder reconciling a pattern with a possibly stale argument list.
//!
//! Arguments bind to placeholders by position, never by name. The pattern is
//! authoritative for structure (grammar, enum options when the stored list is
//! empty, outline variable names) while the stored arguments are
//! authoritative for values. Argument lists shorter than the placeholder
//! count are completed with freshly derived arguments.

use serde::{Deserialize, Serialize};

use crate::arg::{ArgType, StepArg};
use crate::pattern::{
    Placeholder, PlaceholderKind, PlaceholderSyntax, Token, lex_pattern, strip_anchors,
};

/// Cucumber parameter whose step text is written between quotes.
const QUOTED_PARAMETER: &str = "string";

/// One renderable unit of a formatted pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Literal pattern text.
    Text {
        /// Text rendered as-is.
        content: String,
    },
    /// An argument slot.
    Arg {
        /// The reconciled argument, bound or unbound.
        arg: StepArg,
        /// Grammar the placeholder was written in.
        syntax: PlaceholderSyntax,
        /// Placeholder source text, e.g. `{string}` or `(on|off)`.
        source: String,
    },
}

impl Segment {
    /// Return the argument of an `Arg` segment.
    #[must_use]
    pub fn arg(&self) -> Option<&StepArg> {
        match self {
            Self::Arg { arg, .. } => Some(arg),
            Self::Text { .. } => None,
        }
    }

    /// Whether this segment is literal text.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

fn reconcile_arg(placeholder: &Placeholder, ordinal: usize, stored: Option<&StepArg>) -> StepArg {
    let Some(stored) = stored else {
        return StepArg::from_placeholder(placeholder, ordinal);
    };
    let mut arg = stored.clone();
    match &placeholder.kind {
        PlaceholderKind::CucumberExpression { type_name } => {
            if arg.arg_type == ArgType::Enum {
                arg.arg_type = ArgType::from_type_name(type_name);
                arg.enum_values.clear();
            }
        }
        PlaceholderKind::EnumAlternation { options } => {
            arg.arg_type = ArgType::Enum;
            if arg.enum_values.is_empty() {
                arg.enum_values.clone_from(options);
            }
        }
        PlaceholderKind::OutlineVariable { name } => {
            arg.name.clone_from(name);
            if arg.arg_type == ArgType::Enum {
                arg.arg_type = ArgType::String;
                arg.enum_values.clear();
            }
        }
    }
    arg
}

/// Segment a pattern, binding the *i*-th placeholder to `args[i]`.
///
/// Never fails: missing arguments are derived from the pattern, stale enum
/// arguments recover their options, and outline variables take their name
/// from the pattern. Text segments are emitted verbatim after anchor
/// stripping.
///
/// # Examples
/// ```
/// use suisui_patterns::{ArgType, StepArg, parse_segments};
///
/// let stale = vec![StepArg::new("arg0", ArgType::Enum)];
/// let segments = parse_segments("I am logged in as (admin|user|guest)", &stale);
/// let arg = segments.iter().find_map(|s| s.arg()).expect("one arg segment");
/// assert_eq!(arg.enum_values, ["admin", "user", "guest"]);
/// ```
#[must_use]
pub fn parse_segments(pattern: &str, args: &[StepArg]) -> Vec<Segment> {
    let body = strip_anchors(pattern);
    let mut ordinal = 0;
    lex_pattern(pattern)
        .into_iter()
        .map(|token| match token {
            Token::Literal(content) => Segment::Text { content },
            Token::Placeholder(placeholder) => {
                let arg = reconcile_arg(&placeholder, ordinal, args.get(ordinal));
                ordinal += 1;
                Segment::Arg {
                    arg,
                    syntax: placeholder.kind.syntax(),
                    source: placeholder.source(body).to_owned(),
                }
            }
        })
        .collect()
}

/// Reconcile `args` against `pattern`, returning exactly one argument per
/// placeholder.
#[must_use]
pub fn reconcile_args(pattern: &str, args: &[StepArg]) -> Vec<StepArg> {
    parse_segments(pattern, args)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Arg { arg, .. } => Some(arg),
            Segment::Text { .. } => None,
        })
        .collect()
}

fn push_quoted(out: &mut String, value: &str) {
    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

/// Render the Gherkin step text (without keyword) for a pattern and its
/// bound arguments.
///
/// `{string}` values are quoted and every other value is written verbatim.
/// An unbound slot renders as its own placeholder source (`<name>`,
/// `(a|b)`, `{int}`) so the line still resolves to the same pattern; an
/// unbound `{string}` renders as `""`. A value equal to its placeholder
/// source is written as-is.
///
/// # Examples
/// ```
/// use suisui_patterns::{StepArg, ArgType, render_step_text};
///
/// let args = vec![StepArg::new("arg0", ArgType::String).with_value("dashboard")];
/// assert_eq!(
///     render_step_text("I am on the {string} page", &args),
///     r#"I am on the "dashboard" page"#
/// );
/// assert_eq!(render_step_text("I login as <role>", &[]), "I login as <role>");
/// assert_eq!(render_step_text("I pick (red|blue)", &[]), "I pick (red|blue)");
/// ```
#[must_use]
pub fn render_step_text(pattern: &str, args: &[StepArg]) -> String {
    let mut out = String::with_capacity(pattern.len());
    for segment in parse_segments(pattern, args) {
        match segment {
            Segment::Text { content } => out.push_str(&content),
            Segment::Arg { arg, source, .. } if is_echo(&arg.value, &source) => {
                out.push_str(&source);
            }
            Segment::Arg { arg, source, .. } if is_quoted_source(&source) => {
                push_quoted(&mut out, &arg.value);
            }
            Segment::Arg { arg, source, .. } if !arg.is_bound() => out.push_str(&source),
            Segment::Arg { arg, .. } => out.push_str(&arg.value),
        }
    }
    out
}

/// Whether `value` is the placeholder's own source text rather than a
/// value for it.
pub(crate) fn is_echo(value: &str, source: &str) -> bool {
    value == source
}

pub(crate) fn is_quoted_source(source: &str) -> bool {
    source
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .is_some_and(|name| name == QUOTED_PARAMETER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::parse_args;

    fn arg_segments(segments: &[Segment]) -> Vec<&StepArg> {
        segments.iter().filter_map(Segment::arg).collect()
    }

    #[test]
    fn literal_pattern_is_a_single_text_segment() {
        assert_eq!(
            parse_segments("I log out", &[]),
            vec![Segment::Text {
                content: "I log out".into()
            }]
        );
    }

    #[test]
    fn recovers_enum_values_from_pattern() {
        let stale = vec![StepArg::enumeration("arg0", Vec::new())];
        let segments = parse_segments("I am logged in as (admin|user|guest)", &stale);
        let args = arg_segments(&segments);
        assert_eq!(args.len(), 1);
        assert_eq!(
            args.first().map(|a| a.enum_values.clone()),
            Some(vec!["admin".into(), "user".into(), "guest".into()])
        );
    }

    #[test]
    fn keeps_non_empty_stored_enum_values() {
        let admin = StepArg::enumeration("arg0", vec!["admin".into()]);
        let stored = vec![admin.with_value("admin")];
        let segments = parse_segments("I am logged in as (admin|user)", &stored);
        assert_eq!(arg_segments(&segments), stored.iter().collect::<Vec<_>>());
    }

    #[test]
    fn outline_names_come_from_the_pattern() {
        let segments = parse_segments("I fill <field> with <value>", &[]);
        let args = arg_segments(&segments);
        let names: Vec<_> = args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["field", "value"]);
        assert!(args.iter().all(|a| a.arg_type == ArgType::String));
    }

    #[test]
    fn stale_outline_name_is_replaced_but_value_kept() {
        let stored = vec![StepArg::new("arg0", ArgType::String).with_value("email")];
        let segments = parse_segments("I fill <field>", &stored);
        assert_eq!(
            arg_segments(&segments),
            vec![&StepArg::new("field", ArgType::String).with_value("email")]
        );
    }

    #[test]
    fn short_argument_lists_are_completed() {
        let stored = vec![StepArg::new("arg0", ArgType::Int).with_value("3")];
        let args = reconcile_args("I buy {int} {word} in (red|blue)", &stored);
        assert_eq!(
            args,
            vec![
                StepArg::new("arg0", ArgType::Int).with_value("3"),
                StepArg::new("arg1", ArgType::Word),
                StepArg::enumeration("arg2", vec!["red".into(), "blue".into()]),
            ]
        );
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let stored = vec![
            StepArg::new("arg0", ArgType::Int).with_value("1"),
            StepArg::new("arg1", ArgType::Int).with_value("2"),
        ];
        assert_eq!(reconcile_args("I have {int} apples", &stored).len(), 1);
    }

    #[test]
    fn mixed_pattern_yields_three_ordered_args() {
        let segments = parse_segments("user <username> with role (admin|user) fills {string}", &[]);
        let args = arg_segments(&segments);
        assert_eq!(args.len(), 3);
        assert_eq!(args.first().map(|a| a.name.as_str()), Some("username"));
        assert_eq!(args.get(1).map(|a| a.arg_type), Some(ArgType::Enum));
        assert_eq!(
            args.get(1).map(|a| a.enum_values.clone()),
            Some(vec!["admin".into(), "user".into()])
        );
        assert_eq!(args.get(2).map(|a| a.arg_type), Some(ArgType::String));
        assert_eq!(args.get(2).map(|a| a.name.as_str()), Some("arg2"));
    }

    #[test]
    fn segmenting_is_idempotent() {
        let pattern = "^user <username> picks (a|b) and types {string}$";
        let args = parse_args(pattern);
        assert_eq!(parse_segments(pattern, &args), parse_segments(pattern, &args));
        assert_eq!(reconcile_args(pattern, &reconcile_args(pattern, &args)), args);
    }

    #[test]
    fn text_segments_are_verbatim_and_anchor_free() {
        let segments = parse_segments("^I press  {string}  twice$", &[]);
        assert_eq!(
            segments.first(),
            Some(&Segment::Text {
                content: "I press  ".into()
            })
        );
        assert_eq!(
            segments.last(),
            Some(&Segment::Text {
                content: "  twice".into()
            })
        );
    }

    #[test]
    fn renders_values_per_grammar() {
        let pattern = "<user> picks (red|blue) and types {string} {int} times";
        let args = vec![
            StepArg::new("user", ArgType::String),
            StepArg::enumeration("arg1", vec!["red".into(), "blue".into()]).with_value("blue"),
            StepArg::new("arg2", ArgType::String).with_value("hello"),
            StepArg::new("arg3", ArgType::Int).with_value("2"),
        ];
        assert_eq!(
            render_step_text(pattern, &args),
            r#"<user> picks blue and types "hello" 2 times"#
        );
    }

    #[test]
    fn switches_to_single_quotes_for_embedded_double_quotes() {
        let args = vec![StepArg::new("arg0", ArgType::String).with_value(r#"say "hi""#)];
        assert_eq!(render_step_text("I type {string}", &args), r#"I type 'say "hi"'"#);
    }

    #[test]
    fn unbound_string_renders_empty_quotes() {
        assert_eq!(render_step_text("I type {string}", &[]), r#"I type """#);
    }

    #[test]
    fn unbound_slots_render_their_source() {
        assert_eq!(
            render_step_text("I wait {int} seconds as (admin|user)", &[]),
            "I wait {int} seconds as (admin|user)"
        );
    }

    #[test]
    fn source_valued_args_render_verbatim() {
        let args = vec![
            StepArg::new("arg0", ArgType::String).with_value("{string}"),
            StepArg::enumeration("arg1", vec!["a".into(), "b".into()]).with_value("(a|b)"),
        ];
        assert_eq!(
            render_step_text("I type {string} then (a|b)", &args),
            "I type {string} then (a|b)"
        );
    }

    #[test]
    fn segments_serialise_with_type_tag() {
        let segments = parse_segments("I pick (a|b)", &[]);
        let json = match serde_json::to_value(&segments) {
            Ok(json) => json,
            Err(err) => panic!("segments should serialise: {err}"),
        };
        assert_eq!(json[0]["type"], "text");
        assert_eq!(json[1]["type"], "arg");
        assert_eq!(json[1]["syntax"], "enumAlternation");
        assert_eq!(json[1]["arg"]["enumValues"], serde_json::json!(["a", "b"]));
    }
}
