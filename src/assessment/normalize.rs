//! Symptom normalizer: free text in, recognized symptom codes out.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::reference::ReferenceData;

/// Runs of whitespace, underscores and hyphens all fold to a single space.
static RE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_\-]+").expect("Invalid separator regex"));

/// Canonical lookup key for a symptom spelling.
/// "  Chest_Pain " and "chest   pain" both become "chest pain".
pub fn canonical_key(raw: &str) -> String {
    RE_SEPARATORS
        .replace_all(raw.trim(), " ")
        .trim()
        .to_lowercase()
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedSymptoms {
    /// Unique recognized codes, sorted. Sorted iteration keeps every
    /// downstream sum independent of input order.
    pub codes: BTreeSet<String>,
    /// Trimmed input text that matched nothing, deduplicated, first-seen order.
    pub unmatched: Vec<String>,
}

impl NormalizedSymptoms {
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

/// Resolve raw symptom strings against the catalog.
///
/// Blank entries are ignored. Unknown text is never an error; it is returned
/// in `unmatched` for the caller to log.
pub fn normalize<S: AsRef<str>>(raw: &[S], reference: &ReferenceData) -> NormalizedSymptoms {
    let mut codes = BTreeSet::new();
    let mut unmatched = Vec::new();
    let mut seen_unmatched = HashSet::new();

    for entry in raw {
        let key = canonical_key(entry.as_ref());
        if key.is_empty() {
            continue;
        }
        match reference.resolve(&key) {
            Some(code) => {
                codes.insert(code.to_string());
            }
            None => {
                if seen_unmatched.insert(key) {
                    unmatched.push(entry.as_ref().trim().to_string());
                }
            }
        }
    }

    if !unmatched.is_empty() {
        tracing::debug!(
            unmatched = unmatched.len(),
            recognized = codes.len(),
            "Dropped unrecognized symptom text"
        );
    }

    NormalizedSymptoms { codes, unmatched }
}
