//! Regex capture helpers for the best-match resolver.

use regex::Regex;

/// Extract the placeholder captures when `text` matches `re`, returning
/// `None` otherwise.
///
/// Capture group 0 is skipped so capture *i* lines up with placeholder *i*.
/// Groups that did not participate yield empty strings.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use suisui_patterns::capture_values;
/// let regex = Regex::new(r"^I have (.*?) (.*?) apples$")
///     .expect("example ensures fallible call succeeds");
/// let values = capture_values(&regex, "I have 3 red apples");
/// assert_eq!(values, Some(vec!["3".to_string(), "red".to_string()]));
/// assert!(capture_values(&regex, "I have apples").is_none());
/// ```
#[must_use]
pub fn capture_values(re: &Regex, text: &str) -> Option<Vec<String>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|capture| capture.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect(),
    )
}

/// Remove one pair of matching surrounding quotes, `"…"` or `'…'`.
///
/// # Examples
/// ```
/// # use suisui_patterns::unquote;
/// assert_eq!(unquote(r#""dashboard""#), "dashboard");
/// assert_eq!(unquote("'it'"), "it");
/// assert_eq!(unquote(r#""mismatched'"#), r#""mismatched'"#);
/// assert_eq!(unquote("plain"), "plain");
/// ```
#[must_use]
pub fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(value)
}
