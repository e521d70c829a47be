//! Ranked (sorted, truncated) views of frequency tables.

use std::fmt::Display;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::table::FrequencyTable;

/// Sort policy for [`rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Highest count first; ties keep first-occurrence order
    #[default]
    CountDesc,
    /// Ascending key (lexicographic for strings, numeric for hours)
    KeyAsc,
}

/// An ordered `(key, count)` sequence derived from a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedView<K> {
    entries: Vec<(K, u64)>,
}

impl<K> RankedView<K> {
    /// Wraps already ordered entries.
    pub fn from_entries(entries: Vec<(K, u64)>) -> Self {
        Self { entries }
    }

    /// The ordered entries.
    pub fn entries(&self) -> &[(K, u64)] {
        &self.entries
    }

    /// Iterates the entries in view order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the view has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest count in the view (0 when empty).
    pub fn max_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
    }

    /// Consumes the view.
    pub fn into_entries(self) -> Vec<(K, u64)> {
        self.entries
    }
}

impl<K: Display> RankedView<K> {
    /// Keys rendered as strings, in view order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.to_string()).collect()
    }

    /// Converts keys to display labels, e.g. hours to `"0"`..`"23"`.
    pub fn to_labelled(&self) -> RankedView<String> {
        RankedView {
            entries: self
                .entries
                .iter()
                .map(|(key, count)| (key.to_string(), *count))
                .collect(),
        }
    }
}

/// Sorts `table` by `by` and keeps at most `top_n` entries.
///
/// Sorting is stable: entries with equal counts keep the order in which
/// their keys first entered the table. An empty table yields an empty view.
///
/// # Example
///
/// ```rust
/// use chatstats::core::{FrequencyTable, SortBy, rank};
///
/// let hours: FrequencyTable<u32> = [23, 9, 9, 14].into_iter().collect();
///
/// let by_hour = rank(&hours, SortBy::KeyAsc, None);
/// assert_eq!(by_hour.entries(), &[(9, 2), (14, 1), (23, 1)]);
///
/// let busiest = rank(&hours, SortBy::CountDesc, Some(1));
/// assert_eq!(busiest.entries(), &[(9, 2)]);
/// ```
pub fn rank<K>(table: &FrequencyTable<K>, by: SortBy, top_n: Option<usize>) -> RankedView<K>
where
    K: Eq + Hash + Clone + Ord,
{
    let mut entries = table.snapshot();
    match by {
        SortBy::CountDesc => entries.sort_by(|a, b| b.1.cmp(&a.1)),
        SortBy::KeyAsc => entries.sort_by(|a, b| a.0.cmp(&b.0)),
    }
    if let Some(n) = top_n {
        entries.truncate(n);
    }
    RankedView { entries }
}
