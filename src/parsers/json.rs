//! Structured JSON export parser.
//!
//! Handles Meta-style dumps with the mojibake encoding fix.

use crate::config::JsonConfig;
use crate::error::Result;
use crate::parser::{ExportFormat, Parsed, Parser};
use crate::parsing::json::parse_json_document;

/// Parser for structured JSON exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatstats::parsers::JsonParser;
/// use chatstats::parser::Parser;
///
/// let parser = JsonParser::new();
/// let parsed = parser.parse("message_1.json".as_ref())?;
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser {
    config: JsonConfig,
}

impl JsonParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &JsonConfig {
        &self.config
    }
}

impl Parser for JsonParser {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn parse_str(&self, content: &str) -> Result<Parsed> {
        parse_json_document(content, &self.config)
    }
}
