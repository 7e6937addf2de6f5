//! Error types for matcher compilation.
//!
//! Pattern *parsing* never fails; malformed delimiters degrade to literal
//! text. The only fallible step is compiling the generated matcher regex.

use thiserror::Error;

/// Errors surfaced while compiling a step pattern into a matcher.
///
/// # Examples
/// ```
/// use suisui_patterns::PatternError;
/// let err = PatternError::Regex {
///     pattern: "I log out".into(),
///     source: regex::Error::Syntax("bad".into()),
/// };
/// assert!(err.to_string().starts_with("failed to compile matcher for `I log out`"));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The generated regular expression was rejected by the regex engine.
    #[error("failed to compile matcher for `{pattern}`: {source}")]
    Regex {
        /// The raw step pattern the matcher was built from.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
