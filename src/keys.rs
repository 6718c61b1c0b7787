//! Fluent key derivation.
//!
//! The consuming application resolves messages at runtime by normalizing
//! the same (message, comment) pair, so this function must be pure and
//! deterministic: identical inputs always yield identical keys.

/// First two md5 bytes of `s` as 4 lowercase hex characters.
fn simple_hash(s: &str) -> String {
    let digest = md5::compute(s.as_bytes());
    format!("{:02x}{:02x}", digest[0], digest[1])
}

/// Derive a Fluent message identifier from a source message and an
/// optional disambiguating comment.
///
/// Wrapping quotes are stripped and escaped double quotes unescaped,
/// every run of characters outside `[a-zA-Z0-9_-]` collapses to a single
/// underscore, and leading/trailing underscores are trimmed. Fluent
/// requires identifiers to start with a letter, so a `k_` prefix is
/// substituted when the sanitized text does not. A comment contributes a
/// `_xxxx` hash suffix to keep identical messages from different
/// contexts apart.
pub fn normalize_ftl_key(message: &str, comment: Option<&str>) -> String {
    let stripped = message.trim_matches(|c| c == '"' || c == '\'');
    let unescaped = stripped.replace("\\\"", "\"");

    let mut key = String::with_capacity(unescaped.len());
    let mut in_invalid_run = false;
    for c in unescaped.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            key.push(c);
            in_invalid_run = false;
        } else if !in_invalid_run {
            key.push('_');
            in_invalid_run = true;
        }
    }

    let mut key = key.trim_matches('_').to_string();

    if !key.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        key = format!("k_{key}");
    }

    if let Some(comment) = comment {
        key.push('_');
        key.push_str(&simple_hash(comment));
    }

    key
}
