mod common;

use cobertura_merge::merge::merge;
use cobertura_merge::metrics::recalculate;
use cobertura_merge::model::Report;

fn merge_all(reports: Vec<Report>) -> Report {
    let mut acc = Report::new();
    for report in reports {
        merge(&mut acc, report);
    }
    recalculate(&mut acc);
    acc
}

#[test]
fn merge_shards_sums_hit_counts() {
    let merged = merge_all(vec![
        common::fixture("shard_a.xml"),
        common::fixture("shard_b.xml"),
    ]);

    assert_eq!(
        merged.sources,
        vec!["/home/ci/project", "/home/ci/project/vendor"]
    );
    let names: Vec<_> = merged.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["app", "lib"]);

    let app = &merged.packages[0];
    assert_eq!(app.classes.len(), 2);
    let main = &app.classes[0];
    assert_eq!(main.name, "app.main");
    let run = &main.methods[0];
    let run_lines: Vec<_> = run.lines.iter().map(|l| (l.number, l.hits)).collect();
    assert_eq!(run_lines, vec![(1, 3), (2, 0), (3, 1)]);
    assert_eq!(run.metrics.line_rate, 2.0 / 3.0);

    let class_lines: Vec<_> = main.lines.iter().map(|l| (l.number, l.hits)).collect();
    assert_eq!(class_lines, vec![(1, 3), (2, 0), (5, 0), (3, 1)]);

    // run keeps its first-seen complexity of 2, helper adds 1
    assert_eq!(main.metrics.complexity, 3);
    assert_eq!(app.metrics.complexity, 6);
    assert_eq!(merged.packages[1].metrics.complexity, 4);

    assert_eq!(merged.lines_valid, 6);
    assert_eq!(merged.lines_covered, 4);
    assert_eq!(merged.metrics.line_rate, 4.0 / 6.0);
    assert_eq!(merged.metrics.complexity, 0);
    assert_eq!(merged.metrics.branch_rate, 0.0);
}

#[test]
fn merge_order_does_not_change_hits() {
    let ab = merge_all(vec![
        common::fixture("shard_a.xml"),
        common::fixture("shard_b.xml"),
    ]);
    let ba = merge_all(vec![
        common::fixture("shard_b.xml"),
        common::fixture("shard_a.xml"),
    ]);

    assert_eq!(common::method_hits(&ab), common::method_hits(&ba));
    assert_eq!(ab.lines_valid, ba.lines_valid);
    assert_eq!(ab.lines_covered, ba.lines_covered);
}

#[test]
fn merge_same_report_twice_doubles_hits() {
    let once = merge_all(vec![common::fixture("shard_a.xml")]);
    let twice = merge_all(vec![
        common::fixture("shard_a.xml"),
        common::fixture("shard_a.xml"),
    ]);

    assert_eq!(once.packages.len(), twice.packages.len());
    assert_eq!(once.classes().count(), twice.classes().count());
    assert_eq!(once.methods().count(), twice.methods().count());

    let doubled: Vec<_> = common::method_hits(&once)
        .into_iter()
        .map(|(p, c, m, n, h)| (p, c, m, n, h * 2))
        .collect();
    assert_eq!(common::method_hits(&twice), doubled);
    assert_eq!(once.lines_valid, twice.lines_valid);
}

#[test]
fn merge_line_totals_match_method_lines() {
    let merged = merge_all(vec![
        common::fixture("shard_b.xml"),
        common::single_method("extra", "X", "x", &[(1, 0), (2, 0), (3, 9)]),
        common::fixture("shard_a.xml"),
    ]);

    let valid: u64 = merged.methods().map(|m| m.lines.len() as u64).sum();
    let covered: u64 = merged
        .methods()
        .map(|m| m.lines.iter().filter(|l| l.hits > 0).count() as u64)
        .sum();
    assert_eq!(merged.lines_valid, valid);
    assert_eq!(merged.lines_covered, covered);
    assert_eq!(merged.lines_valid, 9);
    assert_eq!(merged.lines_covered, 5);
}

#[test]
fn merge_disjoint_report_passes_through() {
    let shard = common::fixture("shard_a.xml");
    let extra = common::single_method("other", "Y", "y", &[(4, 2)]);

    let mut acc = Report::new();
    merge(&mut acc, shard.clone());
    merge(&mut acc, extra.clone());

    assert_eq!(acc.packages.len(), 3);
    assert_eq!(acc.packages[..2], shard.packages[..]);
    assert_eq!(acc.packages[2], extra.packages[0]);
}

#[test]
fn merge_empty_report_changes_nothing() {
    let with_empty = merge_all(vec![common::fixture("shard_a.xml"), Report::new()]);
    let without = merge_all(vec![common::fixture("shard_a.xml")]);
    assert_eq!(with_empty, without);
}
