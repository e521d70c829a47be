//! Configuration types for extraction and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`HtmlTemplate`] - per-template rules for legacy HTML exports
//! - [`JsonConfig`] - settings for structured JSON exports
//! - [`AnalysisConfig`] - stop words, ranking and report output for a run
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{AnalysisConfig, HtmlTemplate, TimeBasis};
//!
//! let config = AnalysisConfig::new()
//!     .with_top_n(10)
//!     .with_time_basis(TimeBasis::Utc)
//!     .with_rich_template(HtmlTemplate::rich().with_id_pattern(r"^msg\d+$"));
//!
//! assert_eq!(config.top_n, 10);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::ChartFormat;
use crate::text::StopWordMatch;

/// Default location of the stop-word list, relative to the working directory.
pub const DEFAULT_STOPWORDS_PATH: &str = "data/stopwords_ru.txt";

/// Default directory for rendered reports.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default number of words kept in the word-frequency view.
pub const DEFAULT_TOP_N: usize = 20;

/// How epoch timestamps are turned into wall-clock dates and hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBasis {
    /// The machine's local timezone (matches how the exports are read by people)
    #[default]
    Local,
    /// Coordinated Universal Time (reproducible across machines)
    Utc,
}

/// Extraction rules for one legacy HTML export template.
///
/// Two templates are known:
///
/// - [`simple`](HtmlTemplate::simple): every `div.msg_body` is one message;
///   there is no sender or timestamp.
/// - [`rich`](HtmlTemplate::rich): every `div.msg_item` carries an author in
///   `<b>`, a profile link, a permalink anchor whose text is the timestamp
///   (`YYYY.MM.DD HH:MM:SS`) and a `div.msg_body`. Entries whose `id` doesn't
///   match `id_pattern` are service notices, not chat messages.
///
/// # Example
///
/// ```rust
/// use chatstats::config::HtmlTemplate;
///
/// let template = HtmlTemplate::rich().with_container_class("message");
/// assert_eq!(template.container_class, "message");
/// assert!(template.require_timestamp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlTemplate {
    /// CSS class marking the element that starts one record
    pub container_class: String,

    /// CSS class of the element holding the message text
    pub body_class: String,

    /// Tag wrapping the author's display name (`None` = no sender in this template)
    pub author_tag: Option<String>,

    /// CSS class of inline images that carry no text (emoji, stickers)
    pub media_marker_class: String,

    /// Regex the container's `id` attribute must match (`None` = accept all)
    pub id_pattern: Option<String>,

    /// Whether a record without a permalink timestamp is malformed
    pub require_timestamp: bool,
}

impl Default for HtmlTemplate {
    fn default() -> Self {
        Self::simple()
    }
}

impl HtmlTemplate {
    /// Text-body-only template: one `div.msg_body` per message.
    pub fn simple() -> Self {
        Self {
            container_class: "msg_body".to_string(),
            body_class: "msg_body".to_string(),
            author_tag: None,
            media_marker_class: "emoji".to_string(),
            id_pattern: None,
            require_timestamp: false,
        }
    }

    /// Template with author, profile link and timestamped permalink.
    pub fn rich() -> Self {
        Self {
            container_class: "msg_item".to_string(),
            body_class: "msg_body".to_string(),
            author_tag: Some("b".to_string()),
            media_marker_class: "emoji".to_string(),
            id_pattern: Some(r"^msg\d+$".to_string()),
            require_timestamp: true,
        }
    }

    /// Sets the record container class.
    #[must_use]
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    /// Sets the text body class.
    #[must_use]
    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = class.into();
        self
    }

    /// Sets the author tag.
    #[must_use]
    pub fn with_author_tag(mut self, tag: impl Into<String>) -> Self {
        self.author_tag = Some(tag.into());
        self
    }

    /// Sets the message-id pattern.
    #[must_use]
    pub fn with_id_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.id_pattern = Some(pattern.into());
        self
    }

    /// Accepts every container regardless of its `id`.
    #[must_use]
    pub fn without_id_pattern(mut self) -> Self {
        self.id_pattern = None;
        self
    }

    /// Returns `true` if records of this template carry a sender.
    pub fn has_sender(&self) -> bool {
        self.author_tag.is_some()
    }
}

/// Configuration for structured JSON exports.
///
/// # Example
///
/// ```rust
/// use chatstats::config::{JsonConfig, TimeBasis};
///
/// let config = JsonConfig::new().with_time_basis(TimeBasis::Utc);
/// assert_eq!(config.time_basis, TimeBasis::Utc);
/// assert!(config.fix_encoding);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonConfig {
    /// How `timestamp_ms` is converted to a date and hour (default: local)
    pub time_basis: TimeBasis,

    /// Repair Meta's Latin-1 mojibake in sender and text (default: true)
    pub fix_encoding: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            time_basis: TimeBasis::Local,
            fix_encoding: true,
        }
    }
}

impl JsonConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time basis.
    #[must_use]
    pub fn with_time_basis(mut self, basis: TimeBasis) -> Self {
        self.time_basis = basis;
        self
    }

    /// Sets whether to repair mojibake.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }
}

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Stop-word list location (default: `data/stopwords_ru.txt`)
    pub stopwords_path: PathBuf,

    /// Stop-word matching semantics (default: exact)
    pub stop_word_match: StopWordMatch,

    /// Number of words in the word-frequency view (default: 20)
    pub top_n: usize,

    /// Directory receiving the reports (default: `output`)
    pub output_dir: PathBuf,

    /// Report file format (default: SVG chart)
    pub chart_format: ChartFormat,

    /// Settings for JSON exports
    pub json: JsonConfig,

    /// Template used for [`ExportFormat::HtmlSimple`](crate::parser::ExportFormat::HtmlSimple)
    pub simple_template: HtmlTemplate,

    /// Template used for [`ExportFormat::HtmlRich`](crate::parser::ExportFormat::HtmlRich)
    pub rich_template: HtmlTemplate,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stopwords_path: PathBuf::from(DEFAULT_STOPWORDS_PATH),
            stop_word_match: StopWordMatch::default(),
            top_n: DEFAULT_TOP_N,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chart_format: ChartFormat::default(),
            json: JsonConfig::default(),
            simple_template: HtmlTemplate::simple(),
            rich_template: HtmlTemplate::rich(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stop-word file.
    #[must_use]
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = path.into();
        self
    }

    /// Sets stop-word matching semantics.
    #[must_use]
    pub fn with_stop_word_match(mut self, mode: StopWordMatch) -> Self {
        self.stop_word_match = mode;
        self
    }

    /// Sets how many words the word view keeps.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets the report directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the report format.
    #[must_use]
    pub fn with_chart_format(mut self, format: ChartFormat) -> Self {
        self.chart_format = format;
        self
    }

    /// Sets the time basis for JSON exports.
    #[must_use]
    pub fn with_time_basis(mut self, basis: TimeBasis) -> Self {
        self.json.time_basis = basis;
        self
    }

    /// Replaces the JSON settings.
    #[must_use]
    pub fn with_json_config(mut self, json: JsonConfig) -> Self {
        self.json = json;
        self
    }

    /// Replaces the simple HTML template.
    #[must_use]
    pub fn with_simple_template(mut self, template: HtmlTemplate) -> Self {
        self.simple_template = template;
        self
    }

    /// Replaces the rich HTML template.
    #[must_use]
    pub fn with_rich_template(mut self, template: HtmlTemplate) -> Self {
        self.rich_template = template;
        self
    }
}
