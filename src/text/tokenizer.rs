//! Message tokenization.
//!
//! A message is split on whitespace. Each fragment is lowercased, tested
//! against the stop words, and reduced to its longest run of word
//! characters (Latin letters, Cyrillic letters, digits). Fragments without
//! such a run (punctuation, emoji) produce no token.

use std::str::SplitWhitespace;
use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::{StopWordMatch, StopWords};

/// Runs of word characters in an already-lowercased fragment.
static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9a-zа-яё]+").unwrap());

/// Returns the longest word-character run of a lowercased fragment.
///
/// Ties keep the leftmost run.
///
/// # Example
///
/// ```rust
/// use chatstats::text::longest_word_run;
///
/// assert_eq!(longest_word_run("(привет)!"), Some("привет"));
/// assert_eq!(longest_word_run("a-bcd-ef"), Some("bcd"));
/// assert_eq!(longest_word_run("...!"), None);
/// ```
pub fn longest_word_run(fragment: &str) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for m in WORD_RUN.find_iter(fragment) {
        let run = m.as_str();
        let len = run.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((run, len));
        }
    }
    best.map(|(run, _)| run)
}

/// Tokenizes `text`, skipping stop words.
///
/// The returned iterator is lazy and single-pass.
///
/// # Example
///
/// ```rust
/// use chatstats::text::{StopWords, tokenize};
///
/// let stop = StopWords::from_text("и");
/// let tokens: Vec<String> = tokenize("Кошки И собаки!!", &stop).collect();
/// assert_eq!(tokens, ["кошки", "собаки"]);
/// ```
pub fn tokenize<'a>(text: &'a str, stop_words: &'a StopWords) -> Tokens<'a> {
    Tokens {
        fragments: text.split_whitespace(),
        stop_words,
    }
}

/// Iterator over the normalized tokens of one message.
#[derive(Debug)]
pub struct Tokens<'a> {
    fragments: SplitWhitespace<'a>,
    stop_words: &'a StopWords,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let fragment = self.fragments.next()?.to_lowercase();
            if self.stop_words.is_stop_word(&fragment) {
                continue;
            }
            let Some(run) = longest_word_run(&fragment) else {
                continue;
            };
            // Exact mode also rejects punctuated stop words ("и," -> "и")
            if self.stop_words.match_mode() == StopWordMatch::Exact
                && self.stop_words.contains(run)
            {
                continue;
            }
            return Some(run.to_string());
        }
    }
}
