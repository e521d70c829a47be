//! Report table writers.
//!
//! This module persists [`RankedView`](crate::core::RankedView)s as data files:
//! - [`write_csv`] / [`to_csv`] - `label;count` CSV with a header row - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of `{label, count}` - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::output::{to_csv, write_json};
//! use chatstats::core::RankedView;
//!
//! let view = RankedView::from_entries(vec![("привет".to_string(), 3)]);
//!
//! write_json(&view, "words.json")?;
//! let csv_string = to_csv(&view, "Word")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
