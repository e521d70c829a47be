//! Normalized message type shared by every export format.
//!
//! All record extractors convert their native records into [`Message`], so
//! aggregation never needs to know which export a message came from.
//!
//! # Examples
//!
//! ```
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2019, 5, 16)
//!     .unwrap()
//!     .and_hms_opt(16, 52, 51)
//!     .unwrap();
//!
//! let msg = Message::new("1111111111")
//!     .with_sender("Alina Boschenko")
//!     .with_timestamp(ts);
//!
//! assert_eq!(msg.date_key().as_deref(), Some("16/05/19"));
//! assert_eq!(msg.hour(), Some(16));
//! ```

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// `strftime` pattern for the normalized per-date key (`DD/MM/YY`).
pub const DATE_KEY_FORMAT: &str = "%d/%m/%y";

/// A chat message normalized from one export record.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `text` | `String` | Text body, never empty or media-only |
/// | `sender` | `Option<String>` | Display name or id of the author |
/// | `timestamp` | `Option<NaiveDateTime>` | Wall-clock time the message was sent |
///
/// The timestamp is stored as a *local wall-clock* value: HTML exports print
/// local time directly, and JSON epoch values are converted with the configured
/// [`TimeBasis`](crate::config::TimeBasis) before they get here. The simple HTML
/// template carries neither sender nor timestamp, which is why both are optional;
/// such messages only contribute to word counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Text content of the message.
    pub text: String,

    /// Display name or id of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// When the message was sent, in local wall-clock time.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl Message {
    /// Creates a message with only a text body.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: None,
            timestamp: None,
        }
    }

    /// Builder method to set the sender.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender, if known.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the timestamp, if known.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// Returns the normalized `DD/MM/YY` date key.
    pub fn date_key(&self) -> Option<String> {
        self.timestamp
            .map(|ts| ts.format(DATE_KEY_FORMAT).to_string())
    }

    /// Returns the hour of day (0-23).
    pub fn hour(&self) -> Option<u32> {
        self.timestamp.map(|ts| ts.hour())
    }

    /// Returns `true` if the text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
