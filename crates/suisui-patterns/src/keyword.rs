//! Step keyword type shared by step definitions and scenario steps.
//!
//! Step definitions are exported with a primary keyword (`Given`, `When`,
//! `Then`). Gherkin text may also use `And`/`But`, which resolve against the
//! preceding primary keyword.

use gherkin::StepType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Keyword used to categorise a step definition or scenario step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKeyword {
    /// Preconditions.
    Given,
    /// Actions.
    When,
    /// Expected outcomes.
    Then,
    /// Continues the previous primary keyword.
    And,
    /// Contrasting continuation of the previous primary keyword.
    But,
}

impl StepKeyword {
    /// The keywords step definitions are registered under.
    pub const PRIMARY: [Self; 3] = [Self::Given, Self::When, Self::Then];

    /// Return the keyword as written in Gherkin.
    ///
    /// # Examples
    ///
    /// ```
    /// use suisui_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Whether this is `And` or `But`.
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Whether a step written with this keyword may use a definition
    /// registered under `definition`.
    ///
    /// Primary keywords only accept themselves. An unresolved conjunction
    /// accepts any definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use suisui_patterns::StepKeyword;
    ///
    /// assert!(StepKeyword::Given.accepts(StepKeyword::Given));
    /// assert!(!StepKeyword::Given.accepts(StepKeyword::Then));
    /// assert!(StepKeyword::And.accepts(StepKeyword::Then));
    /// ```
    #[must_use]
    pub fn accepts(self, definition: Self) -> bool {
        self.is_conjunction() || self == definition
    }

    /// Resolve a conjunction to the last primary keyword seen.
    ///
    /// Primary keywords are recorded in `prev` and returned unchanged. A
    /// conjunction with nothing recorded resolves to `Given`.
    ///
    /// # Examples
    ///
    /// ```
    /// use suisui_patterns::StepKeyword;
    ///
    /// let mut prev = None;
    /// assert_eq!(StepKeyword::When.resolve(&mut prev), StepKeyword::When);
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::When);
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Self {
        if self.is_conjunction() {
            return prev.unwrap_or(Self::Given);
        }
        *prev = Some(self);
        self
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text is not a step keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "given" => Ok(Self::Given),
            "when" => Ok(Self::When),
            "then" => Ok(Self::Then),
            "and" => Ok(Self::And),
            "but" => Ok(Self::But),
            _ => Err(StepKeywordParseError(trimmed.to_owned())),
        }
    }
}

impl From<StepType> for StepKeyword {
    fn from(ty: StepType) -> Self {
        match ty {
            StepType::Given => Self::Given,
            StepType::When => Self::When,
            StepType::Then => Self::Then,
        }
    }
}
