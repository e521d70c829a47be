//! Unified parser trait for chat exports.
//!
//! Every export variant is read through the same [`Parser`] trait and
//! produces the same [`Parsed`] result: the extracted [`Message`]s plus
//! [`SkipStats`] counting the records that were dropped on the way.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::config::AnalysisConfig;
//! use chatstats::parser::{ExportFormat, Parser, create_parser};
//! use std::path::Path;
//!
//! let parser = create_parser(ExportFormat::Json, &AnalysisConfig::default())?;
//! let parsed = parser.parse(Path::new("message_1.json"))?;
//! println!("{} messages, {} skipped", parsed.messages.len(), parsed.skipped.total());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json"))]
//! # fn main() {}
//! ```
//!
//! # Format Selection
//!
//! Use [`ExportFormat::detect`] to pick the variant from a file's extension
//! and content:
//!
//! ```rust
//! use chatstats::parser::ExportFormat;
//!
//! let html = r#"<div class="msg_item"><a href="/wall1">2019.05.16 16:52:51</a></div>"#;
//! assert_eq!(ExportFormat::detect("im.html", html)?, ExportFormat::HtmlRich);
//! assert_eq!(ExportFormat::detect("im.html", "<div class=\"msg_body\">hi</div>")?, ExportFormat::HtmlSimple);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::AnalysisConfig;
use crate::error::{ChatstatsError, Result};

/// Supported export variants.
///
/// # Example
///
/// ```rust
/// use chatstats::parser::ExportFormat;
/// use std::str::FromStr;
///
/// assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
///
/// // Aliases are supported
/// assert_eq!(ExportFormat::from_str("html").unwrap(), ExportFormat::HtmlSimple);
/// assert_eq!(ExportFormat::from_str("rich").unwrap(), ExportFormat::HtmlRich);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ExportFormat {
    /// Legacy HTML export with a text body only
    #[serde(alias = "html", alias = "simple")]
    HtmlSimple,

    /// Legacy HTML export with sender, profile link and timestamped permalink
    #[serde(alias = "rich")]
    HtmlRich,

    /// Structured JSON export (`timestamp_ms`, sender, content)
    Json,
}

impl ExportFormat {
    /// Returns all format names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["html-simple", "html", "simple", "html-rich", "rich", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::HtmlSimple,
            ExportFormat::HtmlRich,
            ExportFormat::Json,
        ]
    }

    /// Returns `true` for the HTML variants.
    pub fn is_html(&self) -> bool {
        matches!(self, ExportFormat::HtmlSimple | ExportFormat::HtmlRich)
    }

    /// Returns the cargo feature providing this format's parser.
    pub fn required_feature(&self) -> &'static str {
        match self {
            ExportFormat::HtmlSimple | ExportFormat::HtmlRich => "html",
            ExportFormat::Json => "json",
        }
    }

    /// Selects the export variant of a file.
    ///
    /// - `.json` is [`Json`](ExportFormat::Json).
    /// - `.html`/`.htm` is [`HtmlRich`](ExportFormat::HtmlRich) when the
    ///   document carries a `YYYY.MM.DD HH:MM:SS` permalink anchor, otherwise
    ///   [`HtmlSimple`](ExportFormat::HtmlSimple).
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::UnsupportedFormat`] for any other extension.
    pub fn detect(path: impl AsRef<Path>, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => {
                if crate::parsing::html::has_permalink_timestamp(content) {
                    Ok(ExportFormat::HtmlRich)
                } else {
                    Ok(ExportFormat::HtmlSimple)
                }
            }
            "" => Err(ChatstatsError::unsupported_format(
                path,
                "file has no extension, expected .html, .htm or .json",
            )),
            other => Err(ChatstatsError::unsupported_format(
                path,
                format!("unknown extension '.{}', expected .html, .htm or .json", other),
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::HtmlSimple => write!(f, "HTML (simple)"),
            ExportFormat::HtmlRich => write!(f, "HTML (rich)"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html-simple" | "html" | "simple" => Ok(ExportFormat::HtmlSimple),
            "html-rich" | "rich" => Ok(ExportFormat::HtmlRich),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Why a single record produced no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Media attachment, sticker or emoji-only body
    Media,
    /// System/service entry (e.g. id outside the message-id pattern)
    Service,
    /// A required part is missing or unreadable; names the part
    Malformed(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Media => write!(f, "media"),
            SkipReason::Service => write!(f, "service entry"),
            SkipReason::Malformed(part) => write!(f, "malformed ({})", part),
        }
    }
}

/// Counters of skipped records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    /// Media-only records
    pub media: usize,
    /// Service entries
    pub service: usize,
    /// Records missing a required part
    pub malformed: usize,
}

impl SkipStats {
    /// Counts one skipped record.
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Media => self.media += 1,
            SkipReason::Service => self.service += 1,
            SkipReason::Malformed(_) => self.malformed += 1,
        }
    }

    /// Total number of skipped records.
    pub fn total(&self) -> usize {
        self.media + self.service + self.malformed
    }

    /// Adds another set of counters.
    pub fn merge(&mut self, other: SkipStats) {
        self.media += other.media;
        self.service += other.service;
        self.malformed += other.malformed;
    }
}

/// The result of parsing one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Extracted messages in document order
    pub messages: Vec<Message>,
    /// Records that yielded no message
    pub skipped: SkipStats,
}

impl Parsed {
    /// Folds the outcome of one record extraction.
    pub fn push(&mut self, outcome: std::result::Result<Message, SkipReason>) {
        match outcome {
            Ok(message) => self.messages.push(message),
            Err(reason) => self.skipped.record(reason),
        }
    }
}

/// Unified trait for parsing chat exports.
///
/// # Implementation Notes
///
/// Parsers must implement:
/// - [`name`](Parser::name) - Parser identifier
/// - [`format`](Parser::format) - Export variant this parser handles
/// - [`parse_str`](Parser::parse_str) - Parse from a string
///
/// [`parse`](Parser::parse) reads the file and delegates to `parse_str`,
/// attaching the path to parse errors.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Parser for MyParser {
///     fn name(&self) -> &'static str { "MyParser" }
///     fn format(&self) -> ExportFormat { ExportFormat::Json }
///
///     fn parse_str(&self, content: &str) -> Result<Parsed> {
///         // Parse logic here
///         Ok(Parsed::default())
///     }
/// }
/// ```
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the export variant this parser handles.
    fn format(&self) -> ExportFormat;

    /// Parses export content from a string.
    ///
    /// Bad records are skipped and counted; only an unreadable document is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Parse`] if the content cannot be parsed.
    fn parse_str(&self, content: &str) -> Result<Parsed>;

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError`] if:
    /// - File cannot be read ([`ChatstatsError::Read`])
    /// - Content cannot be parsed ([`ChatstatsError::Parse`])
    fn parse(&self, path: &Path) -> Result<Parsed> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ChatstatsError::read(path, e))?;
        self.parse_str(&content).map_err(|e| e.with_path(path))
    }
}

/// Creates a parser for the specified export variant.
///
/// HTML variants use the matching template from `config`; JSON uses
/// `config.json`.
///
/// # Errors
///
/// Returns [`ChatstatsError::InvalidPattern`] if a template's message-id
/// pattern doesn't compile, or [`ChatstatsError::UnsupportedFormat`] if the
/// format's feature is disabled.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "html")]
/// # fn main() -> chatstats::Result<()> {
/// use chatstats::config::AnalysisConfig;
/// use chatstats::parser::{ExportFormat, create_parser};
///
/// let parser = create_parser(ExportFormat::HtmlRich, &AnalysisConfig::default())?;
/// assert_eq!(parser.format(), ExportFormat::HtmlRich);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "html"))]
/// # fn main() {}
/// ```
pub fn create_parser(format: ExportFormat, config: &AnalysisConfig) -> Result<Box<dyn Parser>> {
    match format {
        #[cfg(feature = "html")]
        ExportFormat::HtmlSimple => Ok(Box::new(crate::parsers::HtmlParser::with_template(
            ExportFormat::HtmlSimple,
            config.simple_template.clone(),
        )?)),
        #[cfg(feature = "html")]
        ExportFormat::HtmlRich => Ok(Box::new(crate::parsers::HtmlParser::with_template(
            ExportFormat::HtmlRich,
            config.rich_template.clone(),
        )?)),
        #[cfg(feature = "json")]
        ExportFormat::Json => Ok(Box::new(crate::parsers::JsonParser::with_config(
            config.json,
        ))),
        // Fallback for when features are disabled
        #[allow(unreachable_patterns)]
        _ => {
            let _ = config;
            Err(ChatstatsError::unsupported_format(
                format.to_string(),
                format!(
                    "parser not enabled, rebuild with feature '{}'",
                    format.required_feature()
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str("JSON").unwrap(), ExportFormat::Json);
        assert_eq!(
            ExportFormat::from_str("html").unwrap(),
            ExportFormat::HtmlSimple
        );
        assert_eq!(
            ExportFormat::from_str("html-rich").unwrap(),
            ExportFormat::HtmlRich
        );
        assert!(ExportFormat::from_str("txt").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(ExportFormat::Json.to_string(), "JSON");
        assert_eq!(ExportFormat::HtmlSimple.to_string(), "HTML (simple)");
        assert_eq!(ExportFormat::HtmlRich.to_string(), "HTML (rich)");
    }

    #[test]
    fn test_format_serde_aliases() {
        let parsed: ExportFormat = serde_json::from_str("\"rich\"").unwrap();
        assert_eq!(parsed, ExportFormat::HtmlRich);
        let json = serde_json::to_string(&ExportFormat::HtmlSimple).unwrap();
        assert_eq!(json, "\"html-simple\"");
    }

    #[test]
    fn test_detect_json() {
        assert_eq!(
            ExportFormat::detect("message_1.JSON", "[]").unwrap(),
            ExportFormat::Json
        );
    }

    #[test]
    fn test_detect_html_variants() {
        let rich = r#"<div class="msg_item" id="msg1"><a href="/im?msgid=1"> 2019.05.16 16:52:51 </a></div>"#;
        let simple = r#"<div class="msg_body">привет</div>"#;
        assert_eq!(
            ExportFormat::detect("a.html", rich).unwrap(),
            ExportFormat::HtmlRich
        );
        assert_eq!(
            ExportFormat::detect("a.htm", simple).unwrap(),
            ExportFormat::HtmlSimple
        );
    }

    #[test]
    fn test_detect_unsupported() {
        let err = ExportFormat::detect("chat.txt", "hello").unwrap_err();
        assert!(err.is_unsupported_format());
        let err = ExportFormat::detect("README", "").unwrap_err();
        assert!(err.is_unsupported_format());
    }

    #[test]
    fn test_skip_stats() {
        let mut stats = SkipStats::default();
        stats.record(SkipReason::Media);
        stats.record(SkipReason::Media);
        stats.record(SkipReason::Service);
        stats.record(SkipReason::Malformed("sender"));
        assert_eq!(stats.media, 2);
        assert_eq!(stats.total(), 4);

        let mut other = SkipStats::default();
        other.record(SkipReason::Malformed("timestamp"));
        stats.merge(other);
        assert_eq!(stats.malformed, 2);
    }

    #[test]
    fn test_parsed_push() {
        let mut parsed = Parsed::default();
        parsed.push(Ok(Message::new("hi")));
        parsed.push(Err(SkipReason::Media));
        assert_eq!(parsed.messages.len(), 1);
        assert_eq!(parsed.skipped.media, 1);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Malformed("sender").to_string(), "malformed (sender)");
    }

    #[cfg(all(feature = "html", feature = "json"))]
    #[test]
    fn test_create_parser() {
        let config = AnalysisConfig::default();
        for &format in ExportFormat::all() {
            let parser = create_parser(format, &config).unwrap();
            assert_eq!(parser.format(), format);
        }
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_create_parser_rejects_bad_pattern() {
        let config = AnalysisConfig::default()
            .with_rich_template(crate::config::HtmlTemplate::rich().with_id_pattern("(msg"));
        let err = create_parser(ExportFormat::HtmlRich, &config).err().unwrap();
        assert!(matches!(err, ChatstatsError::InvalidPattern { .. }));
    }
}
