use ftl_extract::config::Config;
use ftl_extract::extractor::{extract_from_source, FileEntries};
use ftl_extract::keys::normalize_ftl_key;
use ftl_extract::pseudoloc::pseudolocalize;

fn extract(source: &str) -> FileEntries {
    extract_from_source(source, "test.rs", &Config::default())
}

fn has_singular(entries: &FileEntries, message: &str, comment: &str) -> bool {
    entries
        .singular
        .iter()
        .any(|e| e.message == message && e.comment == comment)
}

#[test]
fn pattern_basic_call() {
    let entries = extract(r#"let s = tr!(ctx, "Hello there", "Greeting");"#);
    assert!(has_singular(&entries, "Hello there", "Greeting"));
}

#[test]
fn pattern_key_matches_normalizer() {
    let entries = extract(r#"tr!(ctx, "Hello, {name}!", "Greeting", name = n)"#);
    assert_eq!(entries.singular.len(), 1);
    assert_eq!(
        entries.singular[0].normalized_key,
        normalize_ftl_key("Hello, {name}!", Some("Greeting"))
    );
}

#[test]
fn pattern_multiline_call() {
    let entries = extract(
        "tr!(\n    ctx,\n    \"Spread over lines\",\n    \"layout comment\",\n)",
    );
    assert!(has_singular(&entries, "Spread over lines", "layout comment"));
}

#[test]
fn pattern_interpolation_args_ignored() {
    let entries = extract(r#"tr!(ctx, "Hi {user}", "DM header", user = profile.display_name())"#);
    assert_eq!(entries.singular.len(), 1);
    assert_eq!(entries.singular[0].message, "Hi {user}");
}

#[test]
fn pattern_string_with_comma_and_parens() {
    let entries = extract(r#"tr!(ctx, "One, two (three)", "list comment")"#);
    assert!(has_singular(&entries, "One, two (three)", "list comment"));
}

#[test]
fn pattern_escaped_quotes_in_message() {
    let entries = extract(r#"tr!(ctx, "say \"hi\"", "quoting comment")"#);
    assert_eq!(entries.singular.len(), 1);
    // The normalizer unescapes before sanitizing.
    assert_eq!(
        entries.singular[0].normalized_key,
        normalize_ftl_key(r#"say \"hi\""#, Some("quoting comment"))
    );
}

#[test]
fn pattern_two_calls_same_line() {
    let entries =
        extract(r#"(tr!(ctx, "First", "c1"), tr!(ctx, "Second", "c2"))"#);
    assert_eq!(entries.singular.len(), 2);
}

#[test]
fn pattern_commented_out_not_extracted() {
    let entries = extract(
        r#"
        // tr!(ctx, "Dead line", "c")
        /* tr!(ctx, "Dead block", "c") */
        "#,
    );
    assert!(entries.singular.is_empty());
}

#[test]
fn pattern_plural_call() {
    let entries = extract(
        r#"tr_plural!(ctx, "1 note", "{count} notes", "Notification count", count)"#,
    );
    assert_eq!(entries.plural.len(), 1);
    let entry = &entries.plural[0];
    assert_eq!(entry.one, "1 note");
    assert_eq!(entry.other, "{count} notes");
    assert_eq!(
        entry.normalized_key,
        normalize_ftl_key("{count} notes", Some("Notification count"))
    );
}

#[test]
fn pattern_plural_keyed_by_other_form() {
    let entries = extract(
        r#"tr_plural!(ctx, "1 note", "{count} notes", "Notification count", count)"#,
    );
    let entry = &entries.plural[0];
    assert!(entry.normalized_key.starts_with("count_notes_"));
}

#[test]
fn property_normalization_idempotent() {
    let key = normalize_ftl_key("Reply to {author}", None);
    assert_eq!(normalize_ftl_key(&key, None), key);
}

#[test]
fn property_pseudolocalization_preserves_placeables() {
    let value = "Reply to {$author} at { $time }";
    let pseudo = pseudolocalize(value);
    assert!(pseudo.contains("{$author}"));
    assert!(pseudo.contains("{ $time }"));
    // Everything else is accented.
    assert!(pseudo.contains("Réply"));
}
