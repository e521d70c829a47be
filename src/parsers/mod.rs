//! Chat export parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait.
//!
//! # Available Parsers
//!
//! - [`HtmlParser`] - Legacy HTML exports, driven by an [`HtmlTemplate`](crate::config::HtmlTemplate)
//! - [`JsonParser`] - Structured JSON exports
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::parser::Parser;
//! use chatstats::parsers::JsonParser;
//!
//! let parser = JsonParser::new();
//! let parsed = parser.parse_str(r#"[{"timestamp_ms": 0, "sender_name": "Bob", "content": "hi"}]"#)?;
//! assert_eq!(parsed.messages.len(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json"))]
//! # fn main() {}
//! ```

#[cfg(feature = "html")]
mod html;
#[cfg(feature = "json")]
mod json;

#[cfg(feature = "html")]
pub use html::HtmlParser;
#[cfg(feature = "json")]
pub use json::JsonParser;
