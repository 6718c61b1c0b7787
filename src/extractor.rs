//! Extraction of translatable strings from a source tree.
//!
//! Files are scanned for the singular marker (`tr!(identifier, message,
//! comment, ...)`) and the plural marker (`tr_plural!(identifier, one,
//! other, comment, ...)`). The plural entry is keyed by its `other`
//! form, which is what the runtime lookup uses.

use crate::config::Config;
use crate::keys::normalize_ftl_key;
use crate::logging;
use crate::placeholders;
use crate::scanner;
use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Substrings that mark a message as a path, URL, or address rather than
/// UI copy. Such strings never belong in a translation file.
const MESSAGE_SKIP_LIST: &[&str] = &[
    "/", "\\", ".ftl", ".rs", "http", "www", "@", "crates/", "src/", "target/", "build.rs",
];

/// One `tr!` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingularEntry {
    pub normalized_key: String,
    pub message: String,
    pub comment: String,
    pub file: String,
    pub line: usize,
}

/// One `tr_plural!` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralEntry {
    pub normalized_key: String,
    pub one: String,
    pub other: String,
    pub comment: String,
    pub file: String,
    /// 1-based index of the call within its file.
    pub index: usize,
}

/// Everything extracted from a single file.
#[derive(Debug, Default, Clone)]
pub struct FileEntries {
    pub file: String,
    pub singular: Vec<SingularEntry>,
    pub plural: Vec<PluralEntry>,
    /// Messages dropped because of malformed placeholders.
    pub rejected: usize,
}

/// Error encountered while reading a file; the run continues without it.
#[derive(Debug, Clone)]
pub struct ExtractionError {
    pub file_path: String,
    pub message: String,
}

/// Result of extraction across a whole tree, in file-visitation order.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub files: Vec<FileEntries>,
    pub errors: Vec<ExtractionError>,
    pub rejected_count: usize,
    /// How many source files were visited, entries or not.
    pub scanned: usize,
}

impl ExtractionResult {
    pub fn singular_count(&self) -> usize {
        self.files.iter().map(|f| f.singular.len()).sum()
    }

    pub fn plural_count(&self) -> usize {
        self.files.iter().map(|f| f.plural.len()).sum()
    }
}

fn non_empty(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn message_is_skippable(message: &str) -> bool {
    let lower = message.to_lowercase();
    MESSAGE_SKIP_LIST.iter().any(|skip| lower.contains(skip))
}

/// Extract all entries from one file's source text.
///
/// Comments are stripped first so commented-out calls are never
/// mistaken for real ones.
pub fn extract_from_source(source: &str, file: &str, config: &Config) -> FileEntries {
    let stripped = scanner::strip_comments(source);
    let mut entries = FileEntries {
        file: file.to_string(),
        ..Default::default()
    };

    for call in scanner::extract_macro_calls(&stripped, &config.singular_marker) {
        let args = scanner::split_macro_args(&call.args_text);
        if args.len() < 3 {
            continue;
        }
        let message = args[1].trim().to_string();
        let comment = args[2].trim().to_string();

        if let Err(e) = placeholders::validate(&message) {
            logging::warn(&format!("{e} in '{message}' ({file}); message rejected"));
            entries.rejected += 1;
            continue;
        }
        if message_is_skippable(&message) {
            logging::debug(&format!("skipping path-like message '{message}' ({file})"));
            continue;
        }

        let line = scanner::line_of_offset(&stripped, call.offset);
        entries.singular.push(SingularEntry {
            normalized_key: normalize_ftl_key(&message, non_empty(&comment)),
            message,
            comment,
            file: file.to_string(),
            line,
        });
    }

    // The file defining the plural macro would otherwise match its own
    // definition body.
    let definition = format!(
        "macro_rules! {}",
        config.plural_marker.trim_end_matches('!')
    );
    if stripped.contains(&definition) || file.ends_with(&config.macro_definition_file) {
        return entries;
    }

    for (idx, call) in scanner::extract_macro_calls(&stripped, &config.plural_marker)
        .into_iter()
        .enumerate()
    {
        let args = scanner::split_macro_args(&call.args_text);
        if args.len() < 5 {
            continue;
        }
        let one = args[1].trim().to_string();
        let other = args[2].trim().to_string();
        let comment = args[3].trim().to_string();

        if other.is_empty() || other.starts_with("//") || other.starts_with('$') {
            continue;
        }
        if let Err(e) = placeholders::validate(&one).and_then(|_| placeholders::validate(&other)) {
            logging::warn(&format!("{e} in '{other}' ({file}); message rejected"));
            entries.rejected += 1;
            continue;
        }

        entries.plural.push(PluralEntry {
            normalized_key: normalize_ftl_key(&other, non_empty(&comment)),
            one,
            other,
            comment,
            file: file.to_string(),
            index: idx + 1,
        });
    }

    entries
}

/// Compile the config's exclude globs.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

fn is_excluded(path: &Path, excludes: &[Pattern]) -> bool {
    let text = path.to_string_lossy();
    excludes.iter().any(|p| p.matches(&text))
}

/// Find all Rust source files under `root`, pruning version-control,
/// build-output, and dependency-cache directories. The list is sorted so
/// a run visits files in a reproducible order; with last-write-wins
/// collision semantics, that order decides which entry survives.
pub fn find_source_files(root: &Path, config: &Config, excludes: &[Pattern]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && config.skip_dirs.iter().any(|d| d.as_str() == name))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("rs"))
        .filter(|p| !is_excluded(p, excludes))
        .collect();

    files.sort();
    files
}

/// Extract from every source file under `root`.
///
/// Files are processed in parallel; results are merged back in the
/// sorted file order so collision resolution and reporting stay
/// deterministic. A file that cannot be read is recorded and skipped.
pub fn extract_tree(root: &Path, config: &Config) -> Result<ExtractionResult> {
    let excludes = compile_excludes(&config.exclude)?;
    let files = find_source_files(root, config, &excludes);

    let outcomes: Vec<std::result::Result<FileEntries, ExtractionError>> = files
        .par_iter()
        .map(|path| {
            let label = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(source) => Ok(extract_from_source(&source, &label, config)),
                Err(e) => Err(ExtractionError {
                    file_path: label,
                    message: e.to_string(),
                }),
            }
        })
        .collect();

    let mut result = ExtractionResult {
        scanned: files.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(entries) => {
                result.rejected_count += entries.rejected;
                if !entries.singular.is_empty() || !entries.plural.is_empty() {
                    result.files.push(entries);
                }
            }
            Err(err) => {
                logging::warn(&format!("Error reading {}: {}", err.file_path, err.message));
                result.errors.push(err);
            }
        }
    }

    Ok(result)
}
