//! Run-scoped aggregation of extracted entries.
//!
//! The table is an explicit value threaded through the driver, not a
//! process-wide global, so each stage stays unit-testable. Insertions
//! are last-write-wins: a later entry with the same normalized key
//! replaces the earlier one and the overwritten pair is recorded for
//! the collision report.

use crate::extractor::{FileEntries, PluralEntry, SingularEntry};
use crate::keys::normalize_ftl_key;
use std::collections::{BTreeMap, HashMap, HashSet};

/// `(file, comment)` pairs that produced the same normalized key.
pub type CollisionRecord = Vec<(String, String)>;

/// A key used more than once with differing comments inside one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntraFileCollision {
    pub file: String,
    pub key: String,
    /// `(comment, line-or-index)` per occurrence.
    pub occurrences: Vec<(String, usize)>,
}

/// Aggregate mappings for one run, keyed by normalized key.
#[derive(Debug, Default)]
pub struct StringTable {
    singular: HashMap<String, SingularEntry>,
    plural: HashMap<String, PluralEntry>,
    // Occurrences are tracked by the comment-free key: the full key
    // embeds the comment hash, which would hide "same message, two
    // different comments in one file" by construction.
    singular_occurrences: HashMap<(String, String), Vec<(String, usize)>>,
    plural_occurrences: HashMap<(String, String), Vec<(String, usize)>>,
    singular_collisions: BTreeMap<String, CollisionRecord>,
    plural_collisions: BTreeMap<String, CollisionRecord>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's entries into the table, in extraction order.
    pub fn insert_file(&mut self, entries: FileEntries) {
        for entry in entries.singular {
            self.insert_singular(entry);
        }
        for entry in entries.plural {
            self.insert_plural(entry);
        }
    }

    pub fn insert_singular(&mut self, entry: SingularEntry) {
        let bare_key = normalize_ftl_key(&entry.message, None);
        self.singular_occurrences
            .entry((entry.file.clone(), bare_key))
            .or_default()
            .push((entry.comment.clone(), entry.line));

        if let Some(prior) = self.singular.get(&entry.normalized_key) {
            let record = self
                .singular_collisions
                .entry(entry.normalized_key.clone())
                .or_default();
            record.push((prior.file.clone(), prior.comment.clone()));
            record.push((entry.file.clone(), entry.comment.clone()));
        }
        self.singular.insert(entry.normalized_key.clone(), entry);
    }

    pub fn insert_plural(&mut self, entry: PluralEntry) {
        let bare_key = normalize_ftl_key(&entry.other, None);
        self.plural_occurrences
            .entry((entry.file.clone(), bare_key))
            .or_default()
            .push((entry.comment.clone(), entry.index));

        if let Some(prior) = self.plural.get(&entry.normalized_key) {
            let record = self
                .plural_collisions
                .entry(entry.normalized_key.clone())
                .or_default();
            record.push((prior.file.clone(), prior.comment.clone()));
            record.push((entry.file.clone(), entry.comment.clone()));
        }
        self.plural.insert(entry.normalized_key.clone(), entry);
    }

    /// Keys produced more than once across the run, with every
    /// contributing `(file, comment)` pair.
    pub fn singular_collisions(&self) -> &BTreeMap<String, CollisionRecord> {
        &self.singular_collisions
    }

    pub fn plural_collisions(&self) -> &BTreeMap<String, CollisionRecord> {
        &self.plural_collisions
    }

    /// Same key with two or more distinct comments within one file.
    pub fn intra_file_collisions(&self) -> Vec<IntraFileCollision> {
        let mut found = Vec::new();
        for occurrences in [&self.singular_occurrences, &self.plural_occurrences] {
            for ((file, key), seen) in occurrences {
                let distinct: HashSet<&str> =
                    seen.iter().map(|(comment, _)| comment.as_str()).collect();
                if seen.len() > 1 && distinct.len() > 1 {
                    found.push(IntraFileCollision {
                        file: file.clone(),
                        key: key.clone(),
                        occurrences: seen.clone(),
                    });
                }
            }
        }
        found.sort_by(|a, b| (&a.file, &a.key).cmp(&(&b.file, &b.key)));
        found
    }

    pub fn has_collisions(&self) -> bool {
        !self.singular_collisions.is_empty()
            || !self.plural_collisions.is_empty()
            || !self.intra_file_collisions().is_empty()
    }

    pub fn singular_len(&self) -> usize {
        self.singular.len()
    }

    pub fn plural_len(&self) -> usize {
        self.plural.len()
    }

    /// Surviving singular entries, keys sorted case-insensitively.
    pub fn sorted_singular(&self) -> Vec<&SingularEntry> {
        let mut entries: Vec<&SingularEntry> = self.singular.values().collect();
        entries.sort_by_key(|e| e.normalized_key.to_lowercase());
        entries
    }

    /// Surviving plural entries, keys sorted case-insensitively.
    pub fn sorted_plural(&self) -> Vec<&PluralEntry> {
        let mut entries: Vec<&PluralEntry> = self.plural.values().collect();
        entries.sort_by_key(|e| e.normalized_key.to_lowercase());
        entries
    }
}
