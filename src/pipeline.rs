//! Batch analysis of export files.
//!
//! Files are read, parsed and aggregated in parallel with `rayon`; each
//! worker produces a partial [`ChatStats`] and the partials are merged in
//! input order afterwards, so no table is ever shared between threads and
//! ranking ties come out the same on every run.
//!
//! A file that can't be read, detected or parsed is reported in its
//! [`FileReport`] and left out of the totals; the rest of the batch
//! continues.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatstats::config::AnalysisConfig;
//! use chatstats::pipeline::{analyze_files, expand_inputs};
//! use chatstats::text::StopWords;
//! use std::path::PathBuf;
//!
//! let config = AnalysisConfig::default();
//! let stop_words = StopWords::load(&config.stopwords_path)?;
//! let inputs = expand_inputs(&[PathBuf::from("exports/")]);
//!
//! let report = analyze_files(&inputs, &stop_words, &config, None).into_result()?;
//! println!("{} messages", report.stats.messages);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::core::{ChatStats, aggregate};
use crate::error::{ChatstatsError, Result};
use crate::parser::{ExportFormat, SkipStats, create_parser};
use crate::text::StopWords;

/// Extensions picked up when a directory is given as input.
pub const EXPORT_EXTENSIONS: &[&str] = &["html", "htm", "json"];

/// What one successfully analyzed file contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Detected (or forced) export variant
    pub format: ExportFormat,
    /// Messages extracted
    pub messages: usize,
    /// Records skipped
    pub skipped: SkipStats,
}

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<FileSummary>,
}

impl FileReport {
    /// Returns `true` if the file was analyzed.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Merged statistics plus per-file outcomes, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub stats: ChatStats,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Number of files analyzed.
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_ok()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    /// Skip counters summed over all analyzed files.
    pub fn skipped(&self) -> SkipStats {
        let mut total = SkipStats::default();
        for summary in self.files.iter().filter_map(|f| f.outcome.as_ref().ok()) {
            total.merge(summary.skipped);
        }
        total
    }

    /// Fails with [`ChatstatsError::BatchFailed`] when every file failed.
    pub fn into_result(self) -> Result<Self> {
        if !self.files.is_empty() && self.succeeded() == 0 {
            return Err(ChatstatsError::BatchFailed {
                failed: self.files.len(),
            });
        }
        Ok(self)
    }
}

/// Replaces directories by the export files they contain.
///
/// Files are kept as given (even if missing: that is reported per file
/// later). Directory entries are filtered by [`EXPORT_EXTENSIONS`] and
/// sorted by name. A directory that can't be listed or holds no export file
/// is kept as is, so [`analyze_files`] reports it as a failed input without
/// stopping the rest of the batch.
pub fn expand_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = match fs::read_dir(path) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && has_export_extension(p))
                .collect(),
            Err(_) => Vec::new(),
        };
        if found.is_empty() {
            inputs.push(path.clone());
            continue;
        }
        found.sort();
        tracing::debug!(dir = %path.display(), files = found.len(), "expanded input directory");
        inputs.extend(found);
    }
    inputs
}

fn has_export_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| EXPORT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Analyzes one export file.
///
/// The format is detected from the extension and content unless
/// `format_override` is given.
pub fn analyze_file(
    path: &Path,
    stop_words: &StopWords,
    config: &AnalysisConfig,
    format_override: Option<ExportFormat>,
) -> Result<(FileSummary, ChatStats)> {
    if path.is_dir() {
        fs::read_dir(path).map_err(|e| ChatstatsError::read(path, e))?;
        return Err(ChatstatsError::unsupported_format(
            path,
            "directory contains no .html, .htm or .json files",
        ));
    }

    let content = fs::read_to_string(path).map_err(|e| ChatstatsError::read(path, e))?;
    let format = match format_override {
        Some(format) => format,
        None => ExportFormat::detect(path, &content)?,
    };

    let parser = create_parser(format, config)?;
    let parsed = parser
        .parse_str(&content)
        .map_err(|e| e.with_path(path))?;
    let stats = aggregate(&parsed.messages, stop_words);

    tracing::info!(
        path = %path.display(),
        format = %format,
        messages = parsed.messages.len(),
        skipped = parsed.skipped.total(),
        "analyzed export"
    );

    let summary = FileSummary {
        format,
        messages: parsed.messages.len(),
        skipped: parsed.skipped,
    };
    Ok((summary, stats))
}

/// Analyzes every file in parallel and merges the results in input order.
///
/// Never fails as a whole; check [`BatchReport::into_result`] to turn an
/// all-failed batch into an error.
pub fn analyze_files(
    paths: &[PathBuf],
    stop_words: &StopWords,
    config: &AnalysisConfig,
    format_override: Option<ExportFormat>,
) -> BatchReport {
    let results: Vec<Result<(FileSummary, ChatStats)>> = paths
        .par_iter()
        .map(|path| analyze_file(path, stop_words, config, format_override))
        .collect();

    let mut report = BatchReport::default();
    for (path, result) in paths.iter().zip(results) {
        let outcome = match result {
            Ok((summary, partial)) => {
                report.stats.merge(partial);
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping export file");
                Err(e)
            }
        };
        report.files.push(FileReport {
            path: path.clone(),
            outcome,
        });
    }
    report
}
