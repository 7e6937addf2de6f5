//! Step-pattern lexing and matcher compilation.

mod compiler;
pub(crate) mod lexer;
mod placeholder;

use crate::errors::PatternError;
use regex::Regex;

pub use compiler::build_regex_from_pattern;
pub use lexer::{Token, lex_pattern, strip_anchors};
pub use placeholder::{Placeholder, PlaceholderKind, PlaceholderSyntax};

/// Build and compile the matcher regular expression for a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when the generated regex source cannot be
/// compiled, typically because it exceeds the regex size limit.
pub fn compile_regex_from_pattern(pat: &str) -> Result<Regex, PatternError> {
    let source = build_regex_from_pattern(pat);
    Regex::new(&source).map_err(|source| PatternError::Regex {
        pattern: pat.to_owned(),
        source,
    })
}
