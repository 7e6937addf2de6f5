//! Pattern lexer converting raw step patterns into literal and placeholder
//! tokens.
//!
//! A single left-to-right pass recognises three placeholder grammars that can
//! coexist in one pattern. Malformed delimiters never fail the scan; the
//! offending character simply becomes part of the surrounding literal text.

use super::placeholder::{
    Placeholder, parse_alternation, parse_cucumber_expression, parse_outline_variable,
};

/// A lexed unit of a step pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text rendered as-is.
    Literal(String),
    /// A recognised placeholder of any grammar.
    Placeholder(Placeholder),
}

impl Token {
    /// Return the placeholder carried by this token, if any.
    #[must_use]
    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Placeholder(placeholder) => Some(placeholder),
            Self::Literal(_) => None,
        }
    }
}

/// Remove one leading `^` and one trailing `$` regex anchor.
///
/// # Examples
/// ```
/// use suisui_patterns::strip_anchors;
/// assert_eq!(strip_anchors("^I log out$"), "I log out");
/// assert_eq!(strip_anchors("I pay $"), "I pay ");
/// ```
#[must_use]
pub fn strip_anchors(pattern: &str) -> &str {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    body.strip_suffix('$').unwrap_or(body)
}

/// Tokenise a raw step pattern.
///
/// Anchors are stripped first, so placeholder spans are byte offsets into
/// [`strip_anchors`]`(pattern)`.
///
/// # Examples
/// ```
/// use suisui_patterns::{PlaceholderKind, Token, lex_pattern};
///
/// let tokens = lex_pattern("^I am logged in as (admin|user)$");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens.first(), Some(&Token::Literal("I am logged in as ".into())));
/// let Some(Token::Placeholder(placeholder)) = tokens.get(1) else {
///     panic!("expected a placeholder");
/// };
/// assert_eq!(
///     placeholder.kind,
///     PlaceholderKind::EnumAlternation { options: vec!["admin".into(), "user".into()] }
/// );
/// ```
#[must_use]
pub fn lex_pattern(pattern: &str) -> Vec<Token> {
    let body = strip_anchors(pattern);
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    let flush_literal = |literal: &mut String, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(literal)));
        }
    };

    while let Some(ch) = body.get(pos..).and_then(|rest| rest.chars().next()) {
        let placeholder = match ch {
            '{' => parse_cucumber_expression(body, pos),
            '(' => parse_alternation(body, pos),
            '<' => parse_outline_variable(body, pos),
            _ => None,
        };
        match placeholder {
            Some(placeholder) => {
                flush_literal(&mut literal, &mut tokens);
                pos = placeholder.end;
                tokens.push(Token::Placeholder(placeholder));
            }
            None => {
                literal.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    flush_literal(&mut literal, &mut tokens);
    tokens
}

/// Iterate over the placeholders of a pattern in source order.
pub(crate) fn placeholders(tokens: &[Token]) -> impl Iterator<Item = &Placeholder> {
    tokens.iter().filter_map(Token::as_placeholder)
}
