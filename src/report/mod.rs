//! Presentation of the aggregated statistics.
//!
//! [`chart_specs`] turns [`ChatStats`] into four [`Chart`]s (words, persons,
//! dates, hours), each a ranked view plus its title, axis labels and output
//! path. A [`ChartRenderer`] persists them:
//!
//! | Format | Renderer | Feature |
//! |--------|----------|---------|
//! | SVG | [`SvgChartRenderer`] | `charts` |
//! | CSV | [`CsvReportWriter`] | `csv-output` |
//! | JSON | [`JsonReportWriter`] | `json-output` |
//!
//! # Example
//!
//! ```rust,no_run
//! use chatstats::config::AnalysisConfig;
//! use chatstats::core::aggregate;
//! use chatstats::report::render_reports;
//! use chatstats::text::StopWords;
//! use chatstats::Message;
//!
//! let stats = aggregate(&[Message::new("привет мир")], &StopWords::empty());
//! let written = render_reports(&stats, &AnalysisConfig::default(), "chat")?;
//! for path in written {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

#[cfg(feature = "charts")]
mod svg;
mod table;

#[cfg(feature = "charts")]
pub use svg::SvgChartRenderer;
#[cfg(feature = "csv-output")]
pub use table::CsvReportWriter;
#[cfg(feature = "json-output")]
pub use table::JsonReportWriter;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::core::{ChatStats, RankedView, SortBy};
use crate::error::{ChatstatsError, Result};
use crate::format::ChartFormat;

/// Report stem used when several inputs are combined.
pub const COMBINED_STEM: &str = "combined";

/// The four presentations of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Words,
    Persons,
    Dates,
    Hours,
}

impl ChartKind {
    /// All kinds, in rendering order.
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Words,
            ChartKind::Persons,
            ChartKind::Dates,
            ChartKind::Hours,
        ]
    }

    /// File name suffix (`<stem>_<suffix>.<ext>`).
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ChartKind::Words => "word_frequency",
            ChartKind::Persons => "person_frequency",
            ChartKind::Dates => "date_frequency",
            ChartKind::Hours => "hour_frequency",
        }
    }

    /// Sort policy of this presentation.
    pub fn sort(&self) -> SortBy {
        match self {
            ChartKind::Words | ChartKind::Persons => SortBy::CountDesc,
            ChartKind::Dates | ChartKind::Hours => SortBy::KeyAsc,
        }
    }
}

/// Presentation metadata handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Axis label of the keys (also the CSV label header)
    pub category_label: String,
    /// Axis label of the counts
    pub value_label: String,
    pub output_path: PathBuf,
}

/// A ranked view ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub spec: ChartSpec,
    pub view: RankedView<String>,
}

/// Persists charts in one format.
pub trait ChartRenderer: Send + Sync {
    /// Returns the human-readable name of this renderer.
    fn name(&self) -> &'static str;

    /// Returns the format this renderer writes.
    fn format(&self) -> ChartFormat;

    /// Writes `chart` to `chart.spec.output_path`.
    fn render(&self, chart: &Chart) -> Result<()>;
}

/// Creates the renderer for `format`.
///
/// # Errors
///
/// Returns [`ChatstatsError::UnsupportedFormat`] if the format's feature is
/// disabled.
pub fn create_renderer(format: ChartFormat) -> Result<Box<dyn ChartRenderer>> {
    match format {
        #[cfg(feature = "charts")]
        ChartFormat::Svg => Ok(Box::new(SvgChartRenderer::new())),
        #[cfg(feature = "csv-output")]
        ChartFormat::Csv => Ok(Box::new(CsvReportWriter)),
        #[cfg(feature = "json-output")]
        ChartFormat::Json => Ok(Box::new(JsonReportWriter)),
        // Fallback for when features are disabled
        #[allow(unreachable_patterns)]
        _ => Err(ChatstatsError::unsupported_format(
            format.extension(),
            format!(
                "{} reports not enabled, rebuild with feature '{}'",
                format,
                format.required_feature()
            ),
        )),
    }
}

/// Picks the report stem for a set of inputs: the file stem of a single
/// input, [`COMBINED_STEM`] otherwise.
pub fn report_stem(inputs: &[PathBuf]) -> String {
    match inputs {
        [single] => single
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| COMBINED_STEM.to_string()),
        _ => COMBINED_STEM.to_string(),
    }
}

fn output_path(dir: &Path, stem: &str, kind: ChartKind, format: ChartFormat) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        stem,
        kind.file_suffix(),
        format.extension()
    ))
}

/// Builds the four charts of an analysis.
///
/// | Chart | Order | Size |
/// |-------|-------|------|
/// | words | count desc | `config.top_n` |
/// | persons | count desc | all |
/// | dates | `DD/MM/YY` ascending (lexicographic) | all |
/// | hours | 0-23 ascending | all |
pub fn chart_specs(stats: &ChatStats, config: &AnalysisConfig, stem: &str) -> Vec<Chart> {
    ChartKind::all()
        .iter()
        .map(|&kind| {
            let (title, category, value, view) = match kind {
                ChartKind::Words => (
                    format!(
                        "Most used words in {} messages in {}",
                        stats.messages, stem
                    ),
                    "Word",
                    "Uses",
                    stats.words.rank(kind.sort(), Some(config.top_n)),
                ),
                ChartKind::Persons => (
                    format!("Messages per person in {}", stem),
                    "Person",
                    "Messages",
                    stats.senders.rank(kind.sort(), None),
                ),
                ChartKind::Dates => (
                    format!("Messages per date in {}", stem),
                    "Date",
                    "Messages",
                    stats.dates.rank(kind.sort(), None),
                ),
                ChartKind::Hours => (
                    format!("Messages per hour of day in {}", stem),
                    "Hour",
                    "Messages",
                    stats.hours.rank(kind.sort(), None).to_labelled(),
                ),
            };
            Chart {
                spec: ChartSpec {
                    kind,
                    title,
                    category_label: category.to_string(),
                    value_label: value.to_string(),
                    output_path: output_path(&config.output_dir, stem, kind, config.chart_format),
                },
                view,
            }
        })
        .collect()
}

/// Renders every non-empty chart of `stats` into `config.output_dir`.
///
/// The directory is created if absent. Returns the written paths.
pub fn render_reports(stats: &ChatStats, config: &AnalysisConfig, stem: &str) -> Result<Vec<PathBuf>> {
    let renderer = create_renderer(config.chart_format)?;
    fs::create_dir_all(&config.output_dir)?;

    let mut written = Vec::new();
    for chart in chart_specs(stats, config, stem) {
        if chart.view.is_empty() {
            tracing::debug!(kind = ?chart.spec.kind, "nothing to chart");
            continue;
        }
        renderer.render(&chart)?;
        tracing::info!(
            path = %chart.spec.output_path.display(),
            renderer = renderer.name(),
            entries = chart.view.len(),
            "wrote report"
        );
        written.push(chart.spec.output_path);
    }
    Ok(written)
}
