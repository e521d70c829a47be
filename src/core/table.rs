//! Insertion-ordered frequency counter.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use super::rank::{RankedView, SortBy, rank};

/// A key -> count mapping that can only grow.
///
/// Counts are bumped with [`increment`](Self::increment) and combined with
/// [`merge`](Self::merge); nothing ever decrements. The table remembers the
/// order in which keys first appeared, which [`rank`](Self::rank) uses to
/// break count ties deterministically.
///
/// Equality compares counts only, so two tables built from the same keys in
/// a different order are equal.
///
/// # Example
///
/// ```rust
/// use chatstats::core::{FrequencyTable, SortBy};
///
/// let mut table = FrequencyTable::new();
/// for word in ["b", "a", "b", "c", "a"] {
///     table.increment(word.to_string());
/// }
///
/// assert_eq!(table.get("b"), 2);
/// assert_eq!(table.total(), 5);
///
/// let view = table.rank(SortBy::CountDesc, Some(2));
/// assert_eq!(view.labels(), ["b", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Adds `by` occurrences of `key`.
    pub fn add(&mut self, key: K, by: u64) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += by;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, by));
        }
    }

    /// Folds another table into this one.
    ///
    /// Keys new to `self` are appended in `other`'s insertion order.
    pub fn merge(&mut self, other: FrequencyTable<K>) {
        for (key, count) in other.entries {
            self.add(key, count);
        }
    }

    /// Returns the count of `key` (0 if absent).
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterates entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Copies the entries in first-occurrence order.
    pub fn snapshot(&self) -> Vec<(K, u64)> {
        self.entries.clone()
    }

    /// Produces a sorted, optionally truncated view.
    pub fn rank(&self, by: SortBy, top_n: Option<usize>) -> RankedView<K>
    where
        K: Ord,
    {
        rank(self, by, top_n)
    }
}

impl<K: Eq + Hash> PartialEq for FrequencyTable<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(key, count)| {
                other
                    .index
                    .get(key)
                    .is_some_and(|&slot| other.entries[slot].1 == *count)
            })
    }
}

impl<K: Eq + Hash> Eq for FrequencyTable<K> {}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.increment(key);
        }
        table
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for FrequencyTable<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.increment(key);
        }
    }
}
