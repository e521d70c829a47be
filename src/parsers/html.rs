//! Legacy HTML export parser.

use crate::config::HtmlTemplate;
use crate::error::Result;
use crate::parser::{ExportFormat, Parsed, Parser};
use crate::parsing::html::{HtmlRules, parse_html_document};

/// Parser for legacy HTML exports.
///
/// One parser handles one template; [`create_parser`](crate::parser::create_parser)
/// picks the template matching the detected [`ExportFormat`].
///
/// # Example
///
/// ```rust
/// use chatstats::config::HtmlTemplate;
/// use chatstats::parser::{ExportFormat, Parser};
/// use chatstats::parsers::HtmlParser;
///
/// let parser = HtmlParser::with_template(ExportFormat::HtmlSimple, HtmlTemplate::simple())?;
/// let parsed = parser.parse_str(r#"<div class="msg_body">Привет</div>"#)?;
/// assert_eq!(parsed.messages[0].text(), "Привет");
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HtmlParser {
    format: ExportFormat,
    rules: HtmlRules,
}

impl HtmlParser {
    /// Creates a parser reporting `format` and extracting with `template`.
    pub fn with_template(format: ExportFormat, template: HtmlTemplate) -> Result<Self> {
        Ok(Self {
            format,
            rules: HtmlRules::compile(template)?,
        })
    }

    /// Returns the extraction template.
    pub fn template(&self) -> &HtmlTemplate {
        self.rules.template()
    }
}

impl Parser for HtmlParser {
    fn name(&self) -> &'static str {
        match self.format {
            ExportFormat::HtmlRich => "HTML (rich)",
            _ => "HTML (simple)",
        }
    }

    fn format(&self) -> ExportFormat {
        self.format
    }

    fn parse_str(&self, content: &str) -> Result<Parsed> {
        parse_html_document(content, &self.rules)
    }
}
