//! Placeholder recognisers used by the lexer.
//!
//! Each recogniser is handed the anchor-stripped pattern and the byte offset
//! of a candidate opening delimiter. It returns `None` when the text at that
//! position is not a well-formed placeholder of its grammar.

use serde::{Deserialize, Serialize};

/// The grammar a placeholder was written in, with the data that grammar
/// carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `{type}` Cucumber expression parameter, e.g. `{string}` or `{int}`.
    CucumberExpression {
        /// Text between the braces; empty for the anonymous `{}` parameter.
        type_name: String,
    },
    /// `(a|b|c)` regular-expression alternation of literal options.
    EnumAlternation {
        /// Trimmed options in source order, duplicates preserved.
        options: Vec<String>,
    },
    /// `<name>` Scenario Outline variable.
    OutlineVariable {
        /// Text between the angle brackets.
        name: String,
    },
}

impl PlaceholderKind {
    /// Return the grammar without its payload.
    #[must_use]
    pub fn syntax(&self) -> PlaceholderSyntax {
        match self {
            Self::CucumberExpression { .. } => PlaceholderSyntax::CucumberExpression,
            Self::EnumAlternation { .. } => PlaceholderSyntax::EnumAlternation,
            Self::OutlineVariable { .. } => PlaceholderSyntax::OutlineVariable,
        }
    }
}

/// Placeholder grammar tag carried by argument segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderSyntax {
    /// `{type}`
    CucumberExpression,
    /// `(a|b)`
    EnumAlternation,
    /// `<name>`
    OutlineVariable,
}

/// A placeholder recognised in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Grammar and payload of the placeholder.
    pub kind: PlaceholderKind,
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset just past the closing delimiter.
    pub end: usize,
}

impl Placeholder {
    /// Return the placeholder's source text within `body`.
    #[must_use]
    pub fn source<'a>(&self, body: &'a str) -> &'a str {
        body.get(self.start..self.end).unwrap_or_default()
    }
}

/// Split the text after an opening delimiter at the first `close` character.
///
/// Returns the inner text and the byte offset just past the closing
/// delimiter.
fn enclosed(body: &str, start: usize, close: char) -> Option<(&str, usize)> {
    let inner_start = start + 1;
    let rest = body.get(inner_start..)?;
    let close_at = rest.find(close)?;
    let inner = rest.get(..close_at)?;
    Some((inner, inner_start + close_at + close.len_utf8()))
}

fn is_type_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

pub(crate) fn parse_cucumber_expression(body: &str, start: usize) -> Option<Placeholder> {
    let (inner, end) = enclosed(body, start, '}')?;
    if !inner.chars().all(is_type_name_char) {
        return None;
    }
    Some(Placeholder {
        kind: PlaceholderKind::CucumberExpression {
            type_name: inner.to_owned(),
        },
        start,
        end,
    })
}

pub(crate) fn parse_alternation(body: &str, start: usize) -> Option<Placeholder> {
    let (inner, end) = enclosed(body, start, ')')?;
    let inner = inner.strip_prefix("?:").unwrap_or(inner);
    if inner.contains('(') || !inner.contains('|') {
        return None;
    }
    let options = inner.split('|').map(|option| option.trim().to_owned()).collect();
    Some(Placeholder {
        kind: PlaceholderKind::EnumAlternation { options },
        start,
        end,
    })
}

pub(crate) fn parse_outline_variable(body: &str, start: usize) -> Option<Placeholder> {
    let (inner, end) = enclosed(body, start, '>')?;
    if inner.is_empty() || inner.contains('<') {
        return None;
    }
    Some(Placeholder {
        kind: PlaceholderKind::OutlineVariable {
            name: inner.to_owned(),
        },
        start,
        end,
    })
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests exercise recogniser fallibility"
)]
mod tests {
    use super::*;

    #[test]
    fn parses_cucumber_expression() {
        let placeholder = parse_cucumber_expression("{int} apples", 0).unwrap();
        assert_eq!(
            placeholder.kind,
            PlaceholderKind::CucumberExpression {
                type_name: "int".into()
            }
        );
        assert_eq!(placeholder.end, 5);
    }

    #[test]
    fn accepts_anonymous_cucumber_parameter() {
        let placeholder = parse_cucumber_expression("{}", 0).unwrap();
        assert_eq!(
            placeholder.kind,
            PlaceholderKind::CucumberExpression {
                type_name: String::new()
            }
        );
    }

    #[test]
    fn rejects_unterminated_brace() {
        assert!(parse_cucumber_expression("{string", 0).is_none());
    }

    #[test]
    fn splits_and_trims_alternation_options() {
        let placeholder = parse_alternation("( admin | user |admin)", 0).unwrap();
        assert_eq!(
            placeholder.kind,
            PlaceholderKind::EnumAlternation {
                options: vec!["admin".into(), "user".into(), "admin".into()]
            }
        );
    }

    #[test]
    fn ignores_non_capturing_group_marker() {
        let placeholder = parse_alternation("(?:on|off)", 0).unwrap();
        assert_eq!(
            placeholder.kind,
            PlaceholderKind::EnumAlternation {
                options: vec!["on".into(), "off".into()]
            }
        );
    }

    #[test]
    fn rejects_nested_alternation() {
        assert!(parse_alternation("((a|b)|c)", 0).is_none());
    }

    #[test]
    fn outline_variable_keeps_inner_text_verbatim() {
        let placeholder = parse_outline_variable("<first name>", 0).unwrap();
        assert_eq!(
            placeholder.kind,
            PlaceholderKind::OutlineVariable {
                name: "first name".into()
            }
        );
        assert_eq!(placeholder.source("<first name>"), "<first name>");
    }
}
