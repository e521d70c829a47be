//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`InputFormat`] - Forced or detected export variant
//! - [`ChartFormat`] - Report format options
//!
//! # Example
//!
//! ```rust
//! use chatstats::cli::{Args, ChartFormat};
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstats", "messages.html", "--chart", "csv", "--top", "10"]);
//! let config = args.to_config();
//! assert_eq!(config.top_n, 10);
//! assert_eq!(args.chart, ChartFormat::Csv);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{
    AnalysisConfig, DEFAULT_OUTPUT_DIR, DEFAULT_STOPWORDS_PATH, DEFAULT_TOP_N, TimeBasis,
};
use crate::parser::ExportFormat;
use crate::text::StopWordMatch;

/// Word, sender, date and hour-of-day statistics for exported chat
/// archives.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats messages.html
    chatstats exports/ --chart csv -o reports
    chatstats message_1.json message_2.json --utc
    chatstats old_dump.htm --format rich --top 50")]
pub struct Args {
    /// Export files or directories to analyze
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Export variant (detected from extension and content by default)
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: InputFormat,

    /// Stop-word list, one word per line
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STOPWORDS_PATH)]
    pub stopwords: PathBuf,

    /// Drop every word contained in the stop-word file text (substring match)
    #[arg(long)]
    pub legacy_stopwords: bool,

    /// Number of words in the word chart
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Directory the reports are written to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "svg")]
    pub chart: ChartFormat,

    /// Bucket JSON timestamps in UTC instead of the local timezone
    #[arg(long)]
    pub utc: bool,

    /// Log per-record decisions to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the analysis configuration from the arguments.
    pub fn to_config(&self) -> AnalysisConfig {
        let stop_word_match = if self.legacy_stopwords {
            StopWordMatch::Substring
        } else {
            StopWordMatch::Exact
        };
        let time_basis = if self.utc {
            TimeBasis::Utc
        } else {
            TimeBasis::Local
        };

        AnalysisConfig::new()
            .with_stopwords_path(&self.stopwords)
            .with_stop_word_match(stop_word_match)
            .with_top_n(self.top)
            .with_output_dir(&self.output_dir)
            .with_chart_format(self.chart.into())
            .with_time_basis(time_basis)
    }
}

/// Export variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Detect per file
    #[default]
    Auto,

    /// Legacy HTML, simple template (text only)
    #[value(alias = "simple")]
    Html,

    /// Legacy HTML, rich template (sender and permalink timestamp)
    #[value(alias = "html-rich")]
    Rich,

    /// Structured JSON dump
    Json,
}

impl InputFormat {
    /// Returns the forced export format, `None` for detection.
    pub fn export_format(&self) -> Option<ExportFormat> {
        match self {
            InputFormat::Auto => None,
            InputFormat::Html => Some(ExportFormat::HtmlSimple),
            InputFormat::Rich => Some(ExportFormat::HtmlRich),
            InputFormat::Json => Some(ExportFormat::Json),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.export_format() {
            Some(format) => write!(f, "{}", format),
            None => write!(f, "auto"),
        }
    }
}

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// SVG bar charts (default)
    #[default]
    Svg,

    /// `label;count` tables
    Csv,

    /// JSON arrays of `{label, count}`
    Json,
}

impl std::fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::ChartFormat::from(*self))
    }
}

// Conversion to library format type
impl From<ChartFormat> for crate::format::ChartFormat {
    fn from(format: ChartFormat) -> crate::format::ChartFormat {
        match format {
            ChartFormat::Svg => crate::format::ChartFormat::Svg,
            ChartFormat::Csv => crate::format::ChartFormat::Csv,
            ChartFormat::Json => crate::format::ChartFormat::Json,
        }
    }
}
