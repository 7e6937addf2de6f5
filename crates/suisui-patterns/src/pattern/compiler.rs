//! Convert lexed tokens into anchored matcher regular expressions.

use super::lexer::{Token, lex_pattern};

/// Wildcard substituted for every placeholder, regardless of grammar.
pub(crate) const PLACEHOLDER_WILDCARD: &str = "(.*?)";

/// Build an anchored regular expression that matches step text written for
/// `pat`.
///
/// Literal text is escaped and each placeholder becomes one lazy capture
/// group, so capture *i* corresponds to the *i*-th placeholder.
///
/// # Examples
/// ```
/// use suisui_patterns::build_regex_from_pattern;
/// assert_eq!(
///     build_regex_from_pattern("I have {int} (red|green) apples"),
///     r"^I have (.*?) (.*?) apples$"
/// );
/// ```
#[must_use]
pub fn build_regex_from_pattern(pat: &str) -> String {
    let tokens = lex_pattern(pat);
    let mut regex = String::with_capacity(pat.len().saturating_mul(2) + 2);
    regex.push('^');
    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(&text)),
            Token::Placeholder(_) => regex.push_str(PLACEHOLDER_WILDCARD),
        }
    }
    regex.push('$');
    regex
}
