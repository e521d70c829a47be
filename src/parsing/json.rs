//! Record extraction for structured JSON exports.
//!
//! Handles Meta-style message dumps: a top-level array of records (or an
//! object with a `messages` array), each carrying `timestamp_ms`, a sender
//! and a text field. Records that carry media fields instead of text are
//! attachments and are skipped.
//!
//! Meta exports UTF-8 text encoded as ISO-8859-1, so Cyrillic shows up as
//! mojibake (`"ÐŸÑ€Ð¸Ð²ÐµÑ‚"` for `"Привет"`). [`fix_mojibake_encoding`]
//! reverses that.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::Message;
use crate::config::{JsonConfig, TimeBasis};
use crate::error::{ChatstatsError, Result};
use crate::parser::{Parsed, SkipReason};

/// Raw JSON record structure for deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct JsonRawRecord {
    #[serde(default)]
    pub timestamp_ms: Option<i64>,
    #[serde(default, alias = "sender", alias = "from")]
    pub sender_name: Option<String>,
    /// Plain string, or an array of strings and `{"text": ...}` fragments
    #[serde(default, alias = "text")]
    pub content: Option<Value>,
    #[serde(default)]
    pub photos: Option<Value>,
    #[serde(default)]
    pub videos: Option<Value>,
    #[serde(default)]
    pub audio_files: Option<Value>,
    #[serde(default)]
    pub gifs: Option<Value>,
    #[serde(default)]
    pub files: Option<Value>,
    #[serde(default)]
    pub sticker: Option<Value>,
    #[serde(default)]
    pub share: Option<Value>,
}

impl JsonRawRecord {
    /// Returns `true` if the record carries any attachment field.
    pub fn has_media(&self) -> bool {
        [
            &self.photos,
            &self.videos,
            &self.audio_files,
            &self.gifs,
            &self.files,
            &self.sticker,
            &self.share,
        ]
        .iter()
        .any(|field| field.is_some())
    }
}

/// JSON export wrapper: a bare record array or `{"messages": [...]}`.
///
/// Records stay as raw values so one bad record can be skipped without
/// failing the document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonExport {
    Records(Vec<Value>),
    Wrapped { messages: Vec<Value> },
}

impl JsonExport {
    /// Returns the raw records in document order.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            JsonExport::Records(records) | JsonExport::Wrapped { messages: records } => records,
        }
    }
}

/// Flattens a text field.
///
/// Strings are taken as-is; arrays concatenate their string items and the
/// `text` of their object items (formatted-text entities).
pub fn extract_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("text")
                    .and_then(|v| v.as_str())
                    .map(ToString::to_string),
                _ => None,
            })
            .collect::<String>(),
        _ => String::new(),
    }
}

/// Fix Meta's broken encoding (mojibake).
///
/// Each UTF-8 byte was stored as a separate code point, so a string whose
/// chars are all `<= U+00FF` is reassembled into bytes and decoded again.
/// Strings with wider chars, or whose bytes are not valid UTF-8, are
/// returned unchanged.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::json::fix_mojibake_encoding;
///
/// assert_eq!(fix_mojibake_encoding("Hello"), "Hello");
/// assert_eq!(fix_mojibake_encoding("\u{d0}\u{9f}\u{d1}\u{80}\u{d0}\u{b8}"), "При");
/// assert_eq!(fix_mojibake_encoding("Привет"), "Привет");
/// ```
pub fn fix_mojibake_encoding(s: &str) -> String {
    if s.chars().any(|c| u32::from(c) > 0xFF) {
        return s.to_string();
    }
    let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Converts a millisecond Unix epoch to wall-clock time.
///
/// Returns `None` for values outside chrono's representable range.
///
/// # Example
///
/// ```rust
/// use chatstats::config::TimeBasis;
/// use chatstats::parsing::json::epoch_ms_to_local;
///
/// let ts = epoch_ms_to_local(1577836800000, TimeBasis::Utc).unwrap();
/// assert_eq!(ts.to_string(), "2020-01-01 00:00:00");
/// ```
pub fn epoch_ms_to_local(timestamp_ms: i64, basis: TimeBasis) -> Option<NaiveDateTime> {
    let utc = DateTime::from_timestamp_millis(timestamp_ms)?;
    Some(match basis {
        TimeBasis::Utc => utc.naive_utc(),
        TimeBasis::Local => utc.with_timezone(&chrono::Local).naive_local(),
    })
}

/// Extracts a message from one record, or says why it has none.
///
/// - No text (or blank text) with an attachment field: [`SkipReason::Media`]
/// - No text and no attachment: [`SkipReason::Malformed`]`("content")`
/// - Missing sender or timestamp: [`SkipReason::Malformed`]
pub fn extract_json_message(
    raw: &JsonRawRecord,
    config: &JsonConfig,
) -> std::result::Result<Message, SkipReason> {
    let repair = |s: &str| {
        if config.fix_encoding {
            fix_mojibake_encoding(s)
        } else {
            s.to_string()
        }
    };

    let text = raw
        .content
        .as_ref()
        .map(|value| repair(&extract_text(value)))
        .filter(|text| !text.trim().is_empty());
    let Some(text) = text else {
        return Err(if raw.has_media() {
            SkipReason::Media
        } else {
            SkipReason::Malformed("content")
        });
    };

    let sender = raw
        .sender_name
        .as_deref()
        .map(repair)
        .filter(|name| !name.trim().is_empty())
        .ok_or(SkipReason::Malformed("sender"))?;

    let timestamp = raw
        .timestamp_ms
        .and_then(|ms| epoch_ms_to_local(ms, config.time_basis))
        .ok_or(SkipReason::Malformed("timestamp"))?;

    Ok(Message::new(text)
        .with_sender(sender)
        .with_timestamp(timestamp))
}

/// Extracts every record of a JSON document.
///
/// # Errors
///
/// Returns a [`ChatstatsError::Parse`] error if the document is not valid
/// JSON or is neither a record array nor an object with `messages`.
pub fn parse_json_document(content: &str, config: &JsonConfig) -> Result<Parsed> {
    let export: JsonExport =
        serde_json::from_str(content).map_err(|e| ChatstatsError::json_parse(e, None))?;

    let mut parsed = Parsed::default();
    for (index, value) in export.into_records().into_iter().enumerate() {
        let outcome = match serde_json::from_value::<JsonRawRecord>(value) {
            Ok(raw) => extract_json_message(&raw, config),
            Err(e) => {
                tracing::debug!(index, error = %e, "unreadable JSON record");
                Err(SkipReason::Malformed("record"))
            }
        };
        if let Err(reason) = &outcome {
            tracing::debug!(index, %reason, "skipped JSON record");
        }
        parsed.push(outcome);
    }
    Ok(parsed)
}
