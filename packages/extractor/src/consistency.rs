//! Cross-check of extracted families against the independent family index.
//!
//! The index (`gendex.txt`) has one line per indexed person, fields split by
//! `|`, the first field naming the page and family (`f1.htm#f12`). Every
//! extracted person contributes its [`family_key`](PersonRecord::family_key);
//! the two multisets must be equal.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::INDEX_DELIMITER;
use crate::error::Result;
use crate::types::PersonRecord;

/// Count occurrences of each item.
///
/// # Examples
/// ```
/// use family_extractor::consistency::frequencies;
///
/// let counts = frequencies(["a", "b", "a"]);
/// assert_eq!(counts["a"], 2);
/// assert_eq!(counts["b"], 1);
/// ```
pub fn frequencies<K, I>(items: I) -> BTreeMap<K, i64>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Signed difference `a - b` over the union of keys. Zero entries are kept.
///
/// # Examples
/// ```
/// use family_extractor::consistency::{diff_frequencies, frequencies};
///
/// let diff = diff_frequencies(&frequencies(["x", "x"]), &frequencies(["x", "y"]));
/// assert_eq!(diff["x"], 1);
/// assert_eq!(diff["y"], -1);
/// ```
pub fn diff_frequencies<K>(a: &BTreeMap<K, i64>, b: &BTreeMap<K, i64>) -> BTreeMap<K, i64>
where
    K: Ord + Clone,
{
    let mut diff = a.clone();
    for (key, count) in b {
        *diff.entry(key.clone()).or_insert(0) -= count;
    }
    diff
}

/// Read family identifiers from index lines.
///
/// Lines whose first field is empty are skipped.
pub fn index_families<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut families = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let family = line.split(INDEX_DELIMITER).next().unwrap_or_default();
        if !family.is_empty() {
            families.push(family.to_string());
        }
    }
    Ok(families)
}

/// Read family identifiers from an index file.
pub fn read_index(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    index_families(BufReader::new(file))
}

/// Result of comparing extracted families with the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Identifiers seen more often in the corpus than in the index, with the
    /// surplus count.
    pub extra_in_corpus: BTreeMap<String, i64>,

    /// Identifiers seen more often in the index than in the corpus, with the
    /// surplus count.
    pub extra_in_index: BTreeMap<String, i64>,
}

impl ConsistencyReport {
    /// True when both sides enumerate the same multiset.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.extra_in_corpus.is_empty() && self.extra_in_index.is_empty()
    }

    /// Number of identifiers that differ.
    #[must_use]
    pub fn mismatches(&self) -> usize {
        self.extra_in_corpus.len() + self.extra_in_index.len()
    }
}

/// Compare extracted records against index identifiers.
pub fn check_consistency<'a, R, I>(records: R, index: I) -> ConsistencyReport
where
    R: IntoIterator<Item = &'a PersonRecord>,
    I: IntoIterator<Item = String>,
{
    let read = frequencies(records.into_iter().map(PersonRecord::family_key));
    let indexed = frequencies(index);

    let surplus = |diff: BTreeMap<String, i64>| -> BTreeMap<String, i64> {
        diff.into_iter().filter(|(_, count)| *count > 0).collect()
    };

    ConsistencyReport {
        extra_in_corpus: surplus(diff_frequencies(&read, &indexed)),
        extra_in_index: surplus(diff_frequencies(&indexed, &read)),
    }
}
