//! Stop-word vocabulary excluded from word frequencies.
//!
//! The list is a plain text file of whitespace/newline separated words
//! (Cyrillic and Latin). Every entry is lowercased on load.
//!
//! # Matching
//!
//! Two matching semantics are available through [`StopWordMatch`]:
//!
//! | Mode | A fragment is a stop word when... |
//! |------|-----------------------------------|
//! | [`Exact`](StopWordMatch::Exact) | it equals one of the listed words |
//! | [`Substring`](StopWordMatch::Substring) | it occurs anywhere in the raw list text |
//!
//! `Substring` reproduces the legacy behavior, where any fragment found inside
//! the list text is dropped, so `при` goes away when `прием` is listed.
//! Use it only when output must match old reports.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};

/// How a lowercased fragment is tested against the stop-word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordMatch {
    /// Per-word set membership
    #[default]
    Exact,
    /// Substring containment in the concatenated list (legacy)
    Substring,
}

/// An immutable set of lowercase stop words.
///
/// # Example
///
/// ```rust
/// use chatstats::text::{StopWordMatch, StopWords};
///
/// let stop = StopWords::from_text("и в на\nthe");
/// assert!(stop.is_stop_word("the"));
/// assert!(!stop.is_stop_word("привет"));
///
/// let legacy = stop.with_match(StopWordMatch::Substring);
/// assert!(legacy.is_stop_word("he"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
    raw: String,
    mode: StopWordMatch,
}

impl StopWords {
    /// Loads the list from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Configuration`] if the file is missing or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ChatstatsError::configuration(path, e))?;
        let stop_words = Self::from_text(&content);
        tracing::debug!(
            path = %path.display(),
            words = stop_words.len(),
            "loaded stop words"
        );
        Ok(stop_words)
    }

    /// Builds the list from an in-memory blob.
    pub fn from_text(text: &str) -> Self {
        let raw = text.to_lowercase();
        let words = raw.split_whitespace().map(ToString::to_string).collect();
        Self {
            words,
            raw,
            mode: StopWordMatch::Exact,
        }
    }

    /// An empty list that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Switches the matching semantics.
    #[must_use]
    pub fn with_match(mut self, mode: StopWordMatch) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the active matching semantics.
    pub fn match_mode(&self) -> StopWordMatch {
        self.mode
    }

    /// Tests an already-lowercased fragment against the list.
    pub fn is_stop_word(&self, lowercase: &str) -> bool {
        match self.mode {
            StopWordMatch::Exact => self.words.contains(lowercase),
            StopWordMatch::Substring => self.raw.contains(lowercase),
        }
    }

    /// Exact membership, regardless of the active mode.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
