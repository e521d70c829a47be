//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::RankedView;
use crate::error::Result;

/// One row of a ranked view.
#[derive(Serialize)]
struct JsonEntry<'a> {
    label: &'a str,
    count: u64,
}

/// Writes a ranked view to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"label": "привет", "count": 3},
///   {"label": "мир", "count": 1}
/// ]
/// ```
pub fn write_json(view: &RankedView<String>, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(view)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Same format as [`write_json`], returned as a string.
pub fn to_json(view: &RankedView<String>) -> Result<String> {
    let entries: Vec<JsonEntry<'_>> = view
        .iter()
        .map(|(label, count)| JsonEntry {
            label: label.as_str(),
            count,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
