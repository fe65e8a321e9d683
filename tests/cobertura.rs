mod common;

use cobertura_merge::cobertura::{parse, to_xml};
use cobertura_merge::merge::merge;
use cobertura_merge::metrics::recalculate;
use cobertura_merge::model::Report;

#[test]
fn parse_fixture() {
    let report = common::fixture("shard_a.xml");

    assert_eq!(report.sources, vec!["/home/ci/project"]);
    assert_eq!(report.lines_valid, 5);
    assert_eq!(report.metrics.line_rate, 0.4);
    assert_eq!(report.packages.len(), 2);

    let main = &report.packages[0].classes[0];
    assert_eq!(main.filename, "app/main.py");
    assert_eq!(main.methods.len(), 2);
    assert_eq!(main.methods[1].signature, "(x)");
    assert_eq!(main.lines.len(), 3);
}

#[test]
fn merged_output_reads_back() {
    let mut merged = Report::new();
    merge(&mut merged, common::fixture("shard_a.xml"));
    merge(&mut merged, common::fixture("shard_b.xml"));
    recalculate(&mut merged);

    let xml = to_xml(&merged).unwrap();
    let text = String::from_utf8(xml.clone()).unwrap();
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(text.contains(r#"lines-covered="4" lines-valid="6""#));
    assert!(text.contains(r#"<method name="run" signature="()" line-rate="0.6666666666666666" branch-rate="0" complexity="2">"#));

    assert_eq!(parse(&xml).unwrap(), merged);
}
