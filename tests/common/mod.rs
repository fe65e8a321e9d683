#![allow(dead_code)]

use cobertura_merge::model::{Class, Line, Method, Package, Report};

/// Parse a fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> Report {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    cobertura_merge::ingest::read_report(&path).unwrap()
}

/// Build a report with a single package/class/method holding `lines`.
pub fn single_method(package: &str, class: &str, method: &str, lines: &[(u32, u64)]) -> Report {
    let mut m = Method::new(method);
    m.lines = lines.iter().map(|&(n, h)| Line::new(n, h)).collect();
    let mut c = Class::new(class, format!("{class}.py"));
    c.methods.push(m);
    let mut p = Package::new(package);
    p.classes.push(c);
    Report {
        packages: vec![p],
        ..Default::default()
    }
}

/// Every line hit in the report keyed by (package, class, method, line).
pub fn method_hits(report: &Report) -> Vec<(String, String, String, u32, u64)> {
    let mut out = Vec::new();
    for p in &report.packages {
        for c in &p.classes {
            for m in &c.methods {
                for l in &m.lines {
                    out.push((p.name.clone(), c.name.clone(), m.name.clone(), l.number, l.hits));
                }
            }
        }
    }
    out.sort();
    out
}
