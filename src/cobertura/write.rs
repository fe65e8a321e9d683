use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{MergeError, Result};
use crate::model::*;

/// Serialize a report as an indented Cobertura document with an XML
/// declaration. Attribute order is fixed so output is stable across runs.
pub fn to_xml(report: &Report) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_report(&mut writer, report).map_err(MergeError::Encode)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

type XmlResult = std::result::Result<(), quick_xml::Error>;

fn write_report<W: Write>(w: &mut Writer<W>, report: &Report) -> XmlResult {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("coverage");
    push_metrics(&mut root, &report.metrics);
    push_attr(&mut root, "lines-covered", report.lines_covered);
    push_attr(&mut root, "lines-valid", report.lines_valid);
    push_attr(&mut root, "branches-covered", report.branches_covered);
    push_attr(&mut root, "branches-valid", report.branches_valid);
    w.write_event(Event::Start(root))?;

    write_list(w, "sources", &report.sources, |w, source| {
        w.write_event(Event::Start(BytesStart::new("source")))?;
        w.write_event(Event::Text(BytesText::new(source)))?;
        w.write_event(Event::End(BytesEnd::new("source")))
    })?;
    write_list(w, "packages", &report.packages, write_package)?;

    w.write_event(Event::End(BytesEnd::new("coverage")))
}

fn write_package<W: Write>(w: &mut Writer<W>, package: &Package) -> XmlResult {
    let mut start = BytesStart::new("package");
    start.push_attribute(("name", package.name.as_str()));
    push_metrics(&mut start, &package.metrics);
    w.write_event(Event::Start(start))?;
    write_list(w, "classes", &package.classes, write_class)?;
    w.write_event(Event::End(BytesEnd::new("package")))
}

fn write_class<W: Write>(w: &mut Writer<W>, class: &Class) -> XmlResult {
    let mut start = BytesStart::new("class");
    start.push_attribute(("name", class.name.as_str()));
    start.push_attribute(("filename", class.filename.as_str()));
    push_metrics(&mut start, &class.metrics);
    w.write_event(Event::Start(start))?;
    write_list(w, "methods", &class.methods, write_method)?;
    write_list(w, "lines", &class.lines, write_line)?;
    w.write_event(Event::End(BytesEnd::new("class")))
}

fn write_method<W: Write>(w: &mut Writer<W>, method: &Method) -> XmlResult {
    let mut start = BytesStart::new("method");
    start.push_attribute(("name", method.name.as_str()));
    start.push_attribute(("signature", method.signature.as_str()));
    push_metrics(&mut start, &method.metrics);
    w.write_event(Event::Start(start))?;
    write_list(w, "lines", &method.lines, write_line)?;
    w.write_event(Event::End(BytesEnd::new("method")))
}

fn write_line<W: Write>(w: &mut Writer<W>, line: &Line) -> XmlResult {
    let mut start = BytesStart::new("line");
    push_attr(&mut start, "number", line.number);
    push_attr(&mut start, "hits", line.hits);
    w.write_event(Event::Empty(start))
}

/// Write `<name>` wrapping one child per item, or `<name/>` when empty.
fn write_list<W, T, F>(w: &mut Writer<W>, name: &str, items: &[T], mut write_item: F) -> XmlResult
where
    W: Write,
    F: FnMut(&mut Writer<W>, &T) -> XmlResult,
{
    if items.is_empty() {
        return w.write_event(Event::Empty(BytesStart::new(name)));
    }
    w.write_event(Event::Start(BytesStart::new(name)))?;
    for item in items {
        write_item(w, item)?;
    }
    w.write_event(Event::End(BytesEnd::new(name)))
}

fn push_metrics(start: &mut BytesStart, metrics: &Metrics) {
    push_attr(start, "line-rate", metrics.line_rate);
    push_attr(start, "branch-rate", metrics.branch_rate);
    push_attr(start, "complexity", metrics.complexity);
}

fn push_attr(start: &mut BytesStart, key: &str, value: impl ToString) {
    start.push_attribute((key, value.to_string().as_str()));
}
