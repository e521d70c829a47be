//! Per-record extraction shared by all parsers.
//!
//! Each submodule turns one raw export record into a [`Message`](crate::Message)
//! or a [`SkipReason`](crate::parser::SkipReason), and exposes a
//! document-level function that folds every record into a
//! [`Parsed`](crate::parser::Parsed).

pub mod html;

#[cfg(feature = "json")]
pub mod json;

// Re-export commonly used items
pub use html::{
    HtmlRecord, HtmlRules, decode_entities, extract_html_message, has_permalink_timestamp,
    html_to_text, parse_html_document, parse_permalink_timestamp, split_records,
};

#[cfg(feature = "json")]
pub use json::{
    JsonExport, JsonRawRecord, epoch_ms_to_local, extract_json_message, extract_text,
    fix_mojibake_encoding, parse_json_document,
};
