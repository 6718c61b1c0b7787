//! Interpolation placeholder validation and Fluent rewriting.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A message whose `{...}` placeholders cannot be represented in Fluent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("empty placeholder {{}}")]
    Empty,
    #[error("placeholder {{{0}}} does not start with a letter")]
    NonAlphabeticStart(String),
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^}]*)\}").expect("placeholder pattern is invalid"))
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{([a-zA-Z][a-zA-Z0-9_]*)\}").expect("identifier pattern is invalid")
    })
}

/// Check that every `{...}` placeholder in `message` is non-empty and
/// starts with an alphabetic character. A failing message must be
/// excluded from output entirely.
pub fn validate(message: &str) -> Result<(), PlaceholderError> {
    for cap in placeholder_regex().captures_iter(message) {
        let inner = &cap[1];
        if inner.trim().is_empty() {
            return Err(PlaceholderError::Empty);
        }
        if !inner.chars().next().is_some_and(|c| c.is_alphabetic()) {
            return Err(PlaceholderError::NonAlphabeticStart(inner.to_string()));
        }
    }
    Ok(())
}

/// Rewrite source placeholders to Fluent placeables: `{name}` becomes
/// `{$name}`. Escaped double quotes are unescaped first. Only well-formed
/// identifier placeholders are rewritten; malformed ones were already
/// rejected by [`validate`].
pub fn to_fluent(message: &str) -> String {
    let unescaped = message.replace("\\\"", "\"");
    identifier_regex()
        .replace_all(&unescaped, "{$$$1}")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plain_message() {
        assert!(validate("Hello there").is_ok());
    }

    #[test]
    fn test_validate_named_placeholder() {
        assert!(validate("Hello, {name}!").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(validate("oops {}"), Err(PlaceholderError::Empty));
        assert_eq!(validate("oops {  }"), Err(PlaceholderError::Empty));
    }

    #[test]
    fn test_validate_rejects_digit_start() {
        assert_eq!(
            validate("bad {1abc}"),
            Err(PlaceholderError::NonAlphabeticStart("1abc".to_string()))
        );
    }

    #[test]
    fn test_to_fluent_rewrites_identifiers() {
        assert_eq!(to_fluent("Hello, {name}!"), "Hello, {$name}!");
        assert_eq!(to_fluent("{count} items"), "{$count} items");
    }

    #[test]
    fn test_to_fluent_unescapes_quotes() {
        assert_eq!(to_fluent(r#"say \"hi\""#), "say \"hi\"");
    }

    #[test]
    fn test_to_fluent_multiple_placeholders() {
        assert_eq!(
            to_fluent("{first} and {second}"),
            "{$first} and {$second}"
        );
    }
}
