//! Folding messages into frequency tables.

use serde::Serialize;

use super::table::FrequencyTable;
use crate::Message;
use crate::text::{StopWords, tokenize};

/// The four frequency tables of one analysis.
///
/// | Table | Key | Incremented |
/// |-------|-----|-------------|
/// | `words` | lowercase token | once per token occurrence |
/// | `senders` | display name | once per message with a sender |
/// | `dates` | `DD/MM/YY` | once per message with a timestamp |
/// | `hours` | 0-23 | once per message with a timestamp |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatStats {
    /// Word token counts
    pub words: FrequencyTable<String>,
    /// Messages per sender
    pub senders: FrequencyTable<String>,
    /// Messages per date key
    pub dates: FrequencyTable<String>,
    /// Messages per hour of day
    pub hours: FrequencyTable<u32>,
    /// Number of messages folded in
    pub messages: usize,
}

impl ChatStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds another partial result to this one.
    pub fn merge(&mut self, other: ChatStats) {
        self.words.merge(other.words);
        self.senders.merge(other.senders);
        self.dates.merge(other.dates);
        self.hours.merge(other.hours);
        self.messages += other.messages;
    }

    /// Returns `true` if no message was aggregated.
    pub fn is_empty(&self) -> bool {
        self.messages == 0
    }

    /// Short counters for logs and the CLI summary.
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            messages: self.messages,
            tokens: self.words.total(),
            distinct_words: self.words.len(),
            senders: self.senders.len(),
            days: self.dates.len(),
        }
    }
}

/// Totals derived from [`ChatStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub messages: usize,
    pub tokens: u64,
    pub distinct_words: usize,
    pub senders: usize,
    pub days: usize,
}

/// Incremental fold of messages into [`ChatStats`].
///
/// # Example
///
/// ```rust
/// use chatstats::Message;
/// use chatstats::core::Aggregator;
/// use chatstats::text::StopWords;
///
/// let stop = StopWords::from_text("the");
/// let mut aggregator = Aggregator::new(&stop);
/// aggregator.add(&Message::new("The cat").with_sender("Bob"));
/// aggregator.add(&Message::new("cat nap").with_sender("Bob"));
///
/// let stats = aggregator.finish();
/// assert_eq!(stats.words.get("cat"), 2);
/// assert_eq!(stats.words.get("the"), 0);
/// assert_eq!(stats.senders.get("Bob"), 2);
/// ```
#[derive(Debug)]
pub struct Aggregator<'a> {
    stop_words: &'a StopWords,
    stats: ChatStats,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator filtering with `stop_words`.
    pub fn new(stop_words: &'a StopWords) -> Self {
        Self {
            stop_words,
            stats: ChatStats::new(),
        }
    }

    /// Folds one message.
    pub fn add(&mut self, message: &Message) {
        let stats = &mut self.stats;
        stats.words.extend(tokenize(message.text(), self.stop_words));
        if let Some(sender) = message.sender() {
            stats.senders.increment(sender.to_string());
        }
        if let Some(date) = message.date_key() {
            stats.dates.increment(date);
        }
        if let Some(hour) = message.hour() {
            stats.hours.increment(hour);
        }
        stats.messages += 1;
    }

    /// Folds every message of an iterator.
    pub fn extend<'m>(&mut self, messages: impl IntoIterator<Item = &'m Message>) {
        for message in messages {
            self.add(message);
        }
    }

    /// Merges statistics computed elsewhere (e.g. another worker).
    pub fn merge(&mut self, other: ChatStats) {
        self.stats.merge(other);
    }

    /// Returns the statistics gathered so far.
    pub fn stats(&self) -> &ChatStats {
        &self.stats
    }

    /// Consumes the aggregator.
    pub fn finish(self) -> ChatStats {
        self.stats
    }
}

/// Aggregates `messages` in one pass.
///
/// The result doesn't depend on message order; only first-occurrence order
/// inside each table (used for ranking ties) does.
pub fn aggregate<'m>(
    messages: impl IntoIterator<Item = &'m Message>,
    stop_words: &StopWords,
) -> ChatStats {
    let mut aggregator = Aggregator::new(stop_words);
    aggregator.extend(messages);
    aggregator.finish()
}
