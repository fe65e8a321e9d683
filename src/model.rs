//! In-memory representation of a Cobertura coverage report. The codec in
//! `cobertura` produces a `Report` per input file; `merge` folds them into
//! one accumulator and `metrics` derives the rate fields afterwards.

use std::ops::AddAssign;

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Summary statistics carried by every level above `Line`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub line_rate: f64,
    pub branch_rate: f64,
    pub complexity: i64,
}

/// A single executable line and how often it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub number: u32,
    pub hits: u64,
}

impl Line {
    pub fn new(number: u32, hits: u64) -> Self {
        Self { number, hits }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Method {
    pub name: String,
    pub signature: String,
    pub lines: Vec<Line>,
    pub metrics: Metrics,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Class {
    pub name: String,
    pub filename: String,
    pub methods: Vec<Method>,
    /// Class-scoped lines. Merged like method lines, but not part of the
    /// class rate.
    pub lines: Vec<Line>,
    pub metrics: Metrics,
}

impl Class {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Package {
    pub name: String,
    pub classes: Vec<Class>,
    pub metrics: Metrics,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Root of a coverage document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Source roots, in order of first appearance.
    pub sources: Vec<String>,
    pub packages: Vec<Package>,
    pub metrics: Metrics,
    pub lines_covered: u64,
    pub lines_valid: u64,
    pub branches_covered: u64,
    pub branches_valid: u64,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.packages.iter().flat_map(|p| p.classes.iter())
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.classes().flat_map(|c| c.methods.iter())
    }
}

/// Valid/covered line counts for a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTotals {
    pub valid: u64,
    pub covered: u64,
}

impl LineTotals {
    pub fn of(lines: &[Line]) -> Self {
        Self {
            valid: lines.len() as u64,
            covered: lines.iter().filter(|l| l.hits > 0).count() as u64,
        }
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        rate(self.covered, self.valid)
    }
}

impl AddAssign for LineTotals {
    fn add_assign(&mut self, other: Self) {
        self.valid += other.valid;
        self.covered += other.covered;
    }
}
