//! Rendering of the generated Fluent resource file.

use crate::aggregate::StringTable;
use crate::keys::normalize_ftl_key;
use crate::placeholders;
use crate::pseudoloc::pseudolocalize;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

const HEADER: &[&str] = &[
    "# Main translation file",
    "# This file contains common UI strings used throughout the application",
    "# Auto-generated by ftl-extract - DO NOT EDIT MANUALLY",
    "",
];

fn value_for(message: &str, pseudo: bool) -> String {
    let fluent = placeholders::to_fluent(message);
    if pseudo {
        pseudolocalize(&fluent)
    } else {
        fluent
    }
}

/// Render the FTL content for one locale. With `pseudo` set, every
/// value is pseudolocalized; keys, comments, and structure are
/// identical between the two locales.
pub fn generate(table: &StringTable, pseudo: bool) -> String {
    let mut lines: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();

    let singular = table.sorted_singular();
    if !singular.is_empty() {
        lines.push("# Regular strings".to_string());
        for entry in singular {
            lines.push(String::new());
            if !entry.comment.is_empty() {
                lines.push(format!("# {}", entry.comment));
            }
            lines.push(format!(
                "{} = {}",
                entry.normalized_key,
                value_for(&entry.message, pseudo)
            ));
        }
        lines.push(String::new());
    }

    let plural = table.sorted_plural();
    if !plural.is_empty() {
        lines.push("# Pluralized strings".to_string());
        for entry in plural {
            lines.push(String::new());
            if !entry.comment.is_empty() {
                lines.push(format!("# {}", entry.comment));
            }
            lines.push(format!("{} =", entry.normalized_key));
            lines.push("    { $count ->".to_string());
            lines.push(format!("        [one] {}", value_for(&entry.one, pseudo)));
            lines.push(format!("       *[other] {}", value_for(&entry.other, pseudo)));
            lines.push("    }".to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn entry_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^#\s][^=]*?)\s*=\s*(.+)$").expect("entry pattern is invalid"))
}

fn hash_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_[0-9a-f]{4}$").expect("suffix pattern is invalid"))
}

/// Read a previously generated FTL file into a key → value map.
///
/// Comment-hash suffixes are stripped and the remaining key
/// re-normalized, so entries can be matched against fresh extractions.
/// Kept as a utility for merging workflows; the export flow regenerates
/// files from scratch and does not consult it.
pub fn read_existing(path: &Path) -> HashMap<String, String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return HashMap::new();
    };

    let mut existing = HashMap::new();
    for line in content.lines() {
        if let Some(cap) = entry_line_regex().captures(line.trim()) {
            let key = cap[1].trim();
            let value = cap[2].trim();
            let bare = hash_suffix_regex().replace(key, "");
            existing.insert(normalize_ftl_key(&bare, None), value.to_string());
        }
    }

    existing
}
