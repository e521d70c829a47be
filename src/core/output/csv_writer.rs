//! CSV output writer.

use std::fs::File;
use std::path::Path;

use crate::core::RankedView;
use crate::error::Result;

/// Writes a ranked view to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `<label header>`, `Count`
/// - Rows in view order
/// - Encoding: UTF-8
pub fn write_csv(
    view: &RankedView<String>,
    label_header: &str,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(file);
    write_rows(&mut writer, view, label_header)?;
    writer.flush()?;
    Ok(())
}

/// Same format as [`write_csv`], returned as a string.
pub fn to_csv(view: &RankedView<String>, label_header: &str) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    write_rows(&mut writer, view, label_header)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    view: &RankedView<String>,
    label_header: &str,
) -> Result<()> {
    writer.write_record([label_header, "Count"])?;
    for (label, count) in view.iter() {
        let count = count.to_string();
        writer.write_record([label.as_str(), count.as_str()])?;
    }
    Ok(())
}
