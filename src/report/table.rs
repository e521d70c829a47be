//! Data-file renderers backed by the core output writers.

#[cfg(any(feature = "csv-output", feature = "json-output"))]
use super::{Chart, ChartRenderer};
#[cfg(any(feature = "csv-output", feature = "json-output"))]
use crate::error::Result;
#[cfg(any(feature = "csv-output", feature = "json-output"))]
use crate::format::ChartFormat;

/// Writes each chart as a `label;count` CSV table.
#[cfg(feature = "csv-output")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportWriter;

#[cfg(feature = "csv-output")]
impl ChartRenderer for CsvReportWriter {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn format(&self) -> ChartFormat {
        ChartFormat::Csv
    }

    fn render(&self, chart: &Chart) -> Result<()> {
        crate::core::output::write_csv(
            &chart.view,
            &chart.spec.category_label,
            &chart.spec.output_path,
        )
    }
}

/// Writes each chart as a JSON array of `{label, count}`.
#[cfg(feature = "json-output")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportWriter;

#[cfg(feature = "json-output")]
impl ChartRenderer for JsonReportWriter {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> ChartFormat {
        ChartFormat::Json
    }

    fn render(&self, chart: &Chart) -> Result<()> {
        crate::core::output::write_json(&chart.view, &chart.spec.output_path)
    }
}
