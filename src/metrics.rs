//! Bottom-up recalculation of line rates and complexity totals.
//!
//! Only raw line hits are trusted. Each level's `line_rate` is derived from
//! the valid/covered counts of its method lines, carried upward as running
//! totals so no subtree is walked twice. Class-scoped lines are not counted.
//! `branch_rate` is never recomputed, and neither is report-level
//! complexity.

use log::debug;

use crate::model::{Class, LineTotals, Method, Package, Report};

/// Overwrite the derived metric fields of every entity in `report`.
pub fn recalculate(report: &mut Report) {
    let mut totals = LineTotals::default();
    for package in &mut report.packages {
        totals += recalculate_package(package);
    }

    report.lines_valid = totals.valid;
    report.lines_covered = totals.covered;
    report.metrics.line_rate = totals.rate();

    debug!(
        "Recalculated metrics: {}/{} lines covered",
        totals.covered, totals.valid
    );
}

fn recalculate_package(package: &mut Package) -> LineTotals {
    let mut totals = LineTotals::default();
    let mut complexity: i64 = 0;
    for class in &mut package.classes {
        totals += recalculate_class(class);
        complexity = complexity.saturating_add(class.metrics.complexity);
    }

    package.metrics.line_rate = totals.rate();
    package.metrics.complexity = complexity;
    totals
}

fn recalculate_class(class: &mut Class) -> LineTotals {
    let mut totals = LineTotals::default();
    let mut complexity: i64 = 0;
    for method in &mut class.methods {
        totals += recalculate_method(method);
        complexity = complexity.saturating_add(method.metrics.complexity);
    }

    class.metrics.line_rate = totals.rate();
    class.metrics.complexity = complexity;
    totals
}

fn recalculate_method(method: &mut Method) -> LineTotals {
    let totals = LineTotals::of(&method.lines);
    method.metrics.line_rate = totals.rate();
    totals
}
