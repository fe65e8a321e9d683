use std::path::Path;

use log::debug;

use crate::cobertura;
use crate::error::Result;
use crate::model::Report;

/// Read a Cobertura file from disk and parse it.
pub fn read_report(file_path: &Path) -> Result<Report> {
    let content = std::fs::read(file_path)?;
    debug!("Read {} ({} bytes)", file_path.display(), content.len());

    let report = cobertura::parse(&content)?;
    debug!(
        "Parsed {}: {} packages, {} sources",
        file_path.display(),
        report.packages.len(),
        report.sources.len()
    );
    Ok(report)
}
