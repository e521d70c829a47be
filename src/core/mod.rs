//! Core statistics for chatstats.
//!
//! This module contains:
//! - [`table`] - [`FrequencyTable`], the grow-only counter
//! - [`rank`](mod@rank) - [`SortBy`] policies and [`RankedView`]s
//! - [`aggregate`](mod@aggregate) - folding [`Message`]s into [`ChatStats`]
//! - [`output`] - CSV/JSON writers for ranked views
//!
//! # Quick Start
//!
//! ```rust
//! use chatstats::Message;
//! use chatstats::core::{SortBy, aggregate};
//! use chatstats::text::StopWords;
//!
//! let messages = vec![Message::new("кот кот пёс"), Message::new("пёс кот")];
//! let stats = aggregate(&messages, &StopWords::empty());
//!
//! let top = stats.words.rank(SortBy::CountDesc, Some(1));
//! assert_eq!(top.labels(), ["кот"]);
//! ```

pub mod aggregate;
pub mod output;
pub mod rank;
pub mod table;

pub use aggregate::{Aggregator, ChatStats, StatsSummary, aggregate};
pub use rank::{RankedView, SortBy, rank};
pub use table::FrequencyTable;

// Re-export Message from the crate root
pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
