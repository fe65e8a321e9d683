//! Totals for a finished merge, printed after the output file is written.

use std::fmt::Write;

use serde::Serialize;

use crate::model::Report;

/// Counts describing a merged, recalculated report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    pub inputs_merged: usize,
    pub inputs_skipped: usize,
    pub packages: usize,
    pub classes: usize,
    pub methods: usize,
    pub lines_valid: u64,
    pub lines_covered: u64,
    pub line_rate: f64,
}

impl MergeSummary {
    /// Expects `report` to have been through `metrics::recalculate`.
    pub fn new(report: &Report, inputs_merged: usize, inputs_skipped: usize) -> Self {
        Self {
            inputs_merged,
            inputs_skipped,
            packages: report.packages.len(),
            classes: report.classes().count(),
            methods: report.methods().count(),
            lines_valid: report.lines_valid,
            lines_covered: report.lines_covered,
            line_rate: report.metrics.line_rate,
        }
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        writeln!(
            out,
            "Inputs:     {} merged, {} skipped",
            self.inputs_merged, self.inputs_skipped
        )
        .unwrap();
        writeln!(out, "Packages:   {}", self.packages).unwrap();
        writeln!(out, "Classes:    {}", self.classes).unwrap();
        writeln!(out, "Methods:    {}", self.methods).unwrap();
        writeln!(
            out,
            "Lines:      {}/{} ({:.1}%)",
            self.lines_covered,
            self.lines_valid,
            self.line_rate * 100.0
        )
        .unwrap();
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
