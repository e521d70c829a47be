//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers every
//! failure the library reports to its caller. Problems with a single export
//! record are deliberately *not* part of this enum: a malformed or media-only
//! record is skipped and counted (see [`SkipReason`](crate::parser::SkipReason)),
//! it never aborts a file.
//!
//! # Severity
//!
//! | Variant | Scope |
//! |---------|-------|
//! | [`Configuration`](ChatstatsError::Configuration) | Fatal for the whole run |
//! | [`UnsupportedFormat`](ChatstatsError::UnsupportedFormat) | Fatal for one file, batch continues |
//! | [`Parse`](ChatstatsError::Parse) | Fatal for one file, batch continues |
//! | [`Chart`](ChatstatsError::Chart) | Fatal for one chart |

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when an input file doesn't exist or the
    /// output directory cannot be created.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An input file could not be read (missing, a directory that can't be
    /// listed, or text that is not UTF-8).
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        /// The input path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The stop-word resource is missing or unreadable.
    ///
    /// Word frequencies are meaningless without it, so callers treat this
    /// as fatal for the whole run.
    #[error("Cannot load stop words from {}: {source}", path.display())]
    Configuration {
        /// Path of the stop-word file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The input file doesn't match any supported export format.
    #[error("Unsupported export format for {}: {reason}", path.display())]
    UnsupportedFormat {
        /// The offending input path
        path: PathBuf,
        /// Why no format matched
        reason: String,
    },

    /// Failed to parse the input file as a whole.
    ///
    /// Individual bad records never produce this error; it is reserved for
    /// documents that cannot be read at all (e.g. invalid JSON).
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "HTML", "JSON")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A template or configuration regex failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the configuration
        pattern: String,
        /// The regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Every file in a batch failed; there is nothing to report.
    #[error("All {failed} input file(s) failed to load")]
    BatchFailed {
        /// Number of failed files
        failed: usize,
    },

    /// The chart renderer could not produce an output file.
    #[error("Failed to render chart {}: {message}", path.display())]
    Chart {
        /// Target path of the chart
        path: PathBuf,
        /// Renderer-provided description
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(any(feature = "json", feature = "json-output"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of whole-document parse errors.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[cfg(any(feature = "json", feature = "json-output"))]
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Document structure didn't match the expected layout
    #[error("{0}")]
    Structure(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a configuration error for an unreadable stop-word file.
    pub fn configuration(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatstatsError::Configuration {
            path: path.into(),
            source,
        }
    }

    /// Creates a read error for an input file.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatstatsError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates an unsupported-format error.
    pub fn unsupported_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ChatstatsError::UnsupportedFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a structural parse error for HTML documents.
    pub fn html_parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        ChatstatsError::Parse {
            format: "HTML",
            source: ParseErrorKind::Structure(message.into()),
            path,
        }
    }

    /// Creates a parse error for JSON documents.
    #[cfg(feature = "json")]
    pub fn json_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatstatsError::Parse {
            format: "JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        ChatstatsError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates a chart rendering error.
    pub fn chart(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatstatsError::Chart {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attaches a file path to a parse error that was produced from in-memory content.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatstatsError::Parse {
                format,
                source,
                path: None,
            } => ChatstatsError::Parse {
                format,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error, with or without a file path.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_) | ChatstatsError::Read { .. })
    }

    /// Returns `true` if this is a stop-word configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ChatstatsError::Configuration { .. })
    }

    /// Returns `true` if this is an unsupported format error.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ChatstatsError::UnsupportedFormat { .. })
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatstatsError::Parse { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
