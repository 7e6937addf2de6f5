//! Pattern specificity used to rank competing matches.
//!
//! When several step definitions match the same step text, the one with the
//! fewest placeholders wins; equal placeholder counts fall back to the amount
//! of literal text.

use crate::pattern::{Token, lex_pattern};
use std::cmp::Ordering;

/// Specificity score for a step pattern. Greater is more specific.
///
/// # Examples
///
/// ```
/// use suisui_patterns::SpecificityScore;
///
/// let literal = SpecificityScore::calculate("I am on the home page");
/// let generic = SpecificityScore::calculate("I am on the {string} page");
/// assert!(literal > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Number of placeholders of any grammar.
    pub placeholder_count: usize,
    /// Number of literal characters (not bytes), anchors excluded.
    pub literal_chars: usize,
}

impl SpecificityScore {
    /// Score a raw pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use suisui_patterns::SpecificityScore;
    ///
    /// let score = SpecificityScore::calculate("^I pick (red|blue) as <role>$");
    /// assert_eq!(score.placeholder_count, 2);
    /// assert_eq!(score.literal_chars, 11); // "I pick " + " as "
    /// ```
    #[must_use]
    pub fn calculate(pattern: &str) -> Self {
        lex_pattern(pattern)
            .iter()
            .fold(Self::default(), |mut score, token| {
                match token {
                    Token::Literal(text) => score.literal_chars += text.chars().count(),
                    Token::Placeholder(_) => score.placeholder_count += 1,
                }
                score
            })
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .placeholder_count
            .cmp(&self.placeholder_count)
            .then_with(|| self.literal_chars.cmp(&other.literal_chars))
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
