//! # Chatstats
//!
//! A Rust library for computing word, sender, date and hour-of-day
//! statistics over exported chat archives.
//!
//! ## Overview
//!
//! Chatstats reads two families of exports:
//! - **Legacy HTML**: one container element per message, in a *simple*
//!   template (text only) or a *rich* one (author name and a permalink
//!   timestamp `YYYY.MM.DD HH:MM:SS`)
//! - **Structured JSON**: records with `timestamp_ms`, `sender_name` and
//!   `content`, optionally wrapped in `{"messages": [...]}`, with repair of
//!   the Latin-1 mojibake found in Meta dumps
//!
//! Messages are tokenized (lowercased, longest alphanumeric run per
//! whitespace fragment, stop words removed) and counted into four
//! frequency tables. The tables are ranked and written as SVG bar charts,
//! CSV or JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = AnalysisConfig::default();
//!     let stop_words = StopWords::load(&config.stopwords_path)?;
//!
//!     let parser = create_parser(ExportFormat::HtmlRich, &config)?;
//!     let parsed = parser.parse("messages.html".as_ref())?;
//!     let stats = aggregate(&parsed.messages, &stop_words);
//!
//!     for (word, count) in stats.words.rank(SortBy::CountDesc, Some(10)).iter() {
//!         println!("{word}: {count}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Batch Analysis
//!
//! Several files are analyzed in parallel and merged:
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//! use chatstats::pipeline::{analyze_files, expand_inputs};
//! use chatstats::report::render_reports;
//! use std::path::PathBuf;
//!
//! let config = AnalysisConfig::default();
//! let stop_words = StopWords::load(&config.stopwords_path)?;
//! let inputs = expand_inputs(&[PathBuf::from("exports/")]);
//!
//! let report = analyze_files(&inputs, &stop_words, &config, None).into_result()?;
//! render_reports(&report.stats, &config, "exports")?;
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait, [`ExportFormat`](parser::ExportFormat)
//!   detection, [`create_parser`](parser::create_parser)
//! - [`parsing`] - Per-record extraction for HTML and JSON
//! - [`parsers`] - [`HtmlParser`](parsers::HtmlParser), [`JsonParser`](parsers::JsonParser)
//! - [`text`] - [`StopWords`](text::StopWords) and the tokenizer
//! - [`core`] - [`FrequencyTable`](core::FrequencyTable), ranking, aggregation, output writers
//! - [`pipeline`] - Parallel batch analysis
//! - [`report`] - Chart specs and renderers (SVG, CSV, JSON)
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig) and templates
//! - [`cli`] - CLI types (feature `cli`)
//! - [`error`] - Unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod text;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Configuration
    pub use crate::config::{AnalysisConfig, HtmlTemplate, JsonConfig, TimeBasis};
    pub use crate::format::ChartFormat;

    // Parsing
    pub use crate::parser::{ExportFormat, Parsed, Parser, SkipReason, SkipStats, create_parser};

    // Tokenizing
    pub use crate::text::{StopWordMatch, StopWords, tokenize};

    // Statistics
    pub use crate::core::{ChatStats, FrequencyTable, RankedView, SortBy, aggregate};

    // Reports
    pub use crate::report::{ChartRenderer, chart_specs, create_renderer, render_reports};
}
