//! Command handler for the cobertura-merge CLI.
//!
//! `cmd_merge` returns its stdout text as a `String`, making it easy to test
//! without capturing stdout. Per-file diagnostics go through `log`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{info, warn};

use crate::summary::MergeSummary;
use crate::{cobertura, ingest, merge, metrics, model::Report};

/// Output style for the `--summary` flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Style {
    Text,
    Json,
}

/// Merge every readable input into one report and write it to `output`.
///
/// Inputs that cannot be read or parsed are logged and skipped. Failing to
/// encode or write the merged report is an error.
pub fn cmd_merge(output: &Path, inputs: &[PathBuf], summary: Option<Style>) -> Result<String> {
    let mut merged = Report::new();
    let mut merged_count = 0;
    let mut skipped_count = 0;

    for path in inputs {
        match ingest::read_report(path) {
            Ok(report) => {
                merge::merge(&mut merged, report);
                merged_count += 1;
                info!("Merged {}", path.display());
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped_count += 1;
            }
        }
    }

    metrics::recalculate(&mut merged);

    let xml = cobertura::to_xml(&merged).context("Failed to encode merged coverage data")?;
    std::fs::write(output, xml).with_context(|| {
        format!(
            "Failed to write merged coverage data to {}",
            output.display()
        )
    })?;

    let mut out = format!("Merged coverage data written to {}\n", output.display());
    if let Some(style) = summary {
        let totals = MergeSummary::new(&merged, merged_count, skipped_count);
        match style {
            Style::Text => out.push_str(&totals.to_text()),
            Style::Json => {
                out.push_str(&totals.to_json()?);
                out.push('\n');
            }
        }
    }
    Ok(out)
}
