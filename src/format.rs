//! Report format types for the chatstats library.
//!
//! A [`ChartFormat`] selects which [`ChartRenderer`](crate::report::ChartRenderer)
//! persists the ranked views. These types don't depend on CLI frameworks.
//!
//! # Example
//!
//! ```rust
//! use chatstats::format::ChartFormat;
//!
//! let format = ChartFormat::from_path("words.csv")?;
//! assert_eq!(format, ChartFormat::Csv);
//! assert_eq!(format.extension(), "csv");
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;

/// Report file format.
///
/// - [`Svg`](ChartFormat::Svg) - Bar chart image (default, requires `charts`)
/// - [`Csv`](ChartFormat::Csv) - `label;count` table (requires `csv-output`)
/// - [`Json`](ChartFormat::Json) - Array of `{label, count}` (requires `json-output`)
///
/// # Example
///
/// ```rust
/// use chatstats::format::ChartFormat;
/// use std::str::FromStr;
///
/// let format = ChartFormat::from_str("json").unwrap();
/// assert_eq!(format, ChartFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ChartFormat {
    /// SVG bar chart
    #[default]
    Svg,

    /// CSV table with semicolon delimiter
    Csv,

    /// JSON array of label/count objects
    Json,
}

impl ChartFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Csv => "csv",
            ChartFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["svg", "csv", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ChartFormat] {
        &[ChartFormat::Svg, ChartFormat::Csv, ChartFormat::Json]
    }

    /// Returns the cargo feature that provides the renderer for this format.
    pub fn required_feature(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "charts",
            ChartFormat::Csv => "csv-output",
            ChartFormat::Json => "json-output",
        }
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatstatsError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        ext.parse().map_err(|_| {
            ChatstatsError::unsupported_format(
                path,
                format!(
                    "unknown report extension '.{}', expected one of: {}",
                    ext,
                    ChartFormat::all_names().join(", ")
                ),
            )
        })
    }
}

impl std::fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartFormat::Svg => write!(f, "SVG"),
            ChartFormat::Csv => write!(f, "CSV"),
            ChartFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(ChartFormat::Svg),
            "csv" => Ok(ChartFormat::Csv),
            "json" => Ok(ChartFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ChartFormat::all_names().join(", ")
            )),
        }
    }
}
