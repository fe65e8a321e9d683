#![no_main]
use libfuzzer_sys::fuzz_target;

use cobertura_merge::model::Report;

fuzz_target!(|data: &[u8]| {
    // Any parsed report must merge, recalculate, and encode without panicking.
    if let Ok(report) = cobertura_merge::cobertura::parse(data) {
        let mut merged = Report::new();
        cobertura_merge::merge::merge(&mut merged, report.clone());
        cobertura_merge::merge::merge(&mut merged, report);
        cobertura_merge::metrics::recalculate(&mut merged);
        let _ = cobertura_merge::cobertura::to_xml(&merged);
    }
});
