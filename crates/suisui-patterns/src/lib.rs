//! Step-pattern engine for SuiSui.
//!
//! Step patterns come in three placeholder grammars that may be mixed in a
//! single pattern: Cucumber expressions (`{string}`, `{int}`), regex
//! alternations (`(admin|user)`), and Scenario Outline variables (`<role>`).
//! This crate tokenises such patterns, derives typed arguments from them,
//! reconciles stored arguments against the pattern for display and editing,
//! and resolves free step text back to catalog definitions.
//!
//! Every function here is pure and synchronous. None of them fail on
//! malformed patterns; unrecognised delimiters are treated as literal text.

mod arg;
mod capture;
mod definition;
mod errors;
mod keyword;
mod matcher;
mod pattern;
mod segment;
mod specificity;

pub use arg::{ArgType, StepArg, parse_args};
pub use capture::{capture_values, unquote};
pub use definition::StepDefinition;
pub use errors::PatternError;
pub use keyword::{StepKeyword, StepKeywordParseError};
pub use matcher::{StepMatch, find_best_match};
pub use pattern::{
    Placeholder, PlaceholderKind, PlaceholderSyntax, Token, build_regex_from_pattern,
    compile_regex_from_pattern, lex_pattern, strip_anchors,
};
pub use segment::{Segment, parse_segments, reconcile_args, render_step_text};
pub use specificity::SpecificityScore;
