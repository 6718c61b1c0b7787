//! Pseudolocalization for internationalization-coverage testing.
//!
//! Accents a fixed set of characters so untranslated (hardcoded) strings
//! stand out in the UI, without needing a real translation. Fluent
//! placeables must survive the transform untouched or interpolation
//! breaks at runtime.

use regex::Regex;
use std::sync::OnceLock;

fn placeable_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{ *\$[a-zA-Z][a-zA-Z0-9_]* *\}").expect("placeable pattern is invalid")
    })
}

fn substitute(c: char) -> char {
    match c {
        'a' => 'à',
        'e' => 'é',
        'i' => 'í',
        'o' => 'ó',
        'u' => 'ú',
        'A' => 'À',
        'E' => 'É',
        'I' => 'Í',
        'O' => 'Ó',
        'U' => 'Ú',
        'n' => 'ñ',
        'N' => 'Ñ',
        'c' => 'ç',
        'C' => 'Ç',
        other => other,
    }
}

/// Accent a Fluent message value, leaving `{$name}` placeables
/// character-for-character intact, and wrap the result in literal
/// square brackets so pseudolocalized strings are easy to spot.
pub fn pseudolocalize(text: &str) -> String {
    // Swap placeables for sentinels the substitution table cannot touch.
    let placeables: Vec<String> = placeable_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut protected = text.to_string();
    for (i, placeable) in placeables.iter().enumerate() {
        protected = protected.replacen(placeable.as_str(), &sentinel(i), 1);
    }

    let mut result = String::with_capacity(protected.len());
    let mut rest = protected.as_str();
    while !rest.is_empty() {
        if rest.starts_with("<<PLACEABLE_") {
            if let Some(end) = rest.find(">>") {
                result.push_str(&rest[..end + 2]);
                rest = &rest[end + 2..];
                continue;
            }
        }
        let c = rest.chars().next().expect("non-empty remainder");
        result.push(substitute(c));
        rest = &rest[c.len_utf8()..];
    }

    for (i, placeable) in placeables.iter().enumerate() {
        result = result.replacen(&sentinel(i), placeable, 1);
    }

    format!("{{\"[\"}}{result}{{\"]\"}}")
}

fn sentinel(i: usize) -> String {
    format!("<<PLACEABLE_{i}>>")
}
