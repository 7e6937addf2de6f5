//! Typed step arguments and the argument extractor.

use serde::{Deserialize, Serialize};

use crate::pattern::lexer::{lex_pattern, placeholders};
use crate::pattern::{Placeholder, PlaceholderKind};

/// Value type of a step argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Free text. Also used for unrecognised Cucumber parameter types.
    #[default]
    String,
    /// Whole number.
    Int,
    /// Decimal number.
    Float,
    /// Single word without whitespace.
    Word,
    /// One of a fixed list of options.
    Enum,
}

impl ArgType {
    /// Map a Cucumber expression parameter name onto an argument type.
    ///
    /// Unknown and custom parameter types are treated as `string`.
    ///
    /// # Examples
    /// ```
    /// use suisui_patterns::ArgType;
    /// assert_eq!(ArgType::from_type_name("int"), ArgType::Int);
    /// assert_eq!(ArgType::from_type_name("color"), ArgType::String);
    /// ```
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "int" => Self::Int,
            "float" => Self::Float,
            "word" => Self::Word,
            _ => Self::String,
        }
    }

    /// Return the lowercase wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Word => "word",
            Self::Enum => "enum",
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_required() -> bool {
    true
}

/// One argument slot of a step, optionally bound to a value.
///
/// An empty `value` means the slot is unbound. `enum_values` is only
/// populated for [`ArgType::Enum`]; an enum argument with no values is stale
/// and gets repaired by [`parse_segments`](crate::parse_segments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepArg {
    /// Argument name, unique within a step.
    pub name: String,
    /// Value type.
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    /// Whether validation requires a value.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Currently bound text.
    #[serde(default)]
    pub value: String,
    /// Options for enum arguments, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl StepArg {
    /// Create an unbound, required argument.
    #[must_use]
    pub fn new(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            required: true,
            value: String::new(),
            enum_values: Vec::new(),
        }
    }

    /// Create an unbound enum argument with its options.
    #[must_use]
    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            enum_values: values,
            ..Self::new(name, ArgType::Enum)
        }
    }

    /// Return a copy bound to `value`.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Whether the argument has a bound value.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.value.is_empty()
    }

    /// Whether this is an enum argument whose options were lost.
    #[must_use]
    pub fn is_stale_enum(&self) -> bool {
        self.arg_type == ArgType::Enum && self.enum_values.is_empty()
    }

    /// Derive the unbound argument for the placeholder at `ordinal`.
    ///
    /// Cucumber expressions and alternations are named `arg{ordinal}`,
    /// counting every placeholder in the pattern; outline variables keep their
    /// bracket text.
    pub(crate) fn from_placeholder(placeholder: &Placeholder, ordinal: usize) -> Self {
        match &placeholder.kind {
            PlaceholderKind::CucumberExpression { type_name } => {
                Self::new(synthesized_name(ordinal), ArgType::from_type_name(type_name))
            }
            PlaceholderKind::EnumAlternation { options } => {
                Self::enumeration(synthesized_name(ordinal), options.clone())
            }
            PlaceholderKind::OutlineVariable { name } => Self::new(name.clone(), ArgType::String),
        }
    }
}

fn synthesized_name(ordinal: usize) -> String {
    format!("arg{ordinal}")
}

/// Derive the canonical, unbound argument list of a pattern.
///
/// One argument is produced per placeholder, in pattern order. Patterns
/// without placeholders yield an empty list.
///
/// # Examples
/// ```
/// use suisui_patterns::{ArgType, parse_args};
///
/// let args = parse_args("user <username> logs in with {int} attempts");
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.first().map(|a| a.name.as_str()), Some("username"));
/// assert_eq!(args.get(1).map(|a| a.name.as_str()), Some("arg1"));
/// assert_eq!(args.get(1).map(|a| a.arg_type), Some(ArgType::Int));
/// ```
#[must_use]
pub fn parse_args(pattern: &str) -> Vec<StepArg> {
    let tokens = lex_pattern(pattern);
    placeholders(&tokens)
        .enumerate()
        .map(|(ordinal, placeholder)| StepArg::from_placeholder(placeholder, ordinal))
        .collect()
}
