/// Reader for Cobertura XML coverage reports.
///
/// Cobertura XML structure:
///   <coverage line-rate="..." branch-rate="..." complexity="..." ...>
///     <sources><source>...</source></sources>
///     <packages>
///       <package name="..." line-rate="..." ...>
///         <classes>
///           <class name="..." filename="..." line-rate="..." ...>
///             <methods>
///               <method name="..." signature="..." line-rate="..." ...>
///                 <lines><line number="..." hits="..."/></lines>
///               </method>
///             </methods>
///             <lines>
///               <line number="..." hits="..." branch="true|false"
///                     condition-coverage="50% (1/2)" />
///             </lines>
///           </class>
///         </classes>
///       </package>
///     </packages>
///   </coverage>
///
/// Elements and attributes outside this shape (`<conditions>`, `branch`,
/// `version`, ...) are skipped.
use std::collections::HashMap;
use std::fmt::Display;
use std::str::{self, FromStr};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{MergeError, Result};
use crate::model::*;

/// Parse a Cobertura document into a [`Report`].
pub fn parse(input: &[u8]) -> Result<Report> {
    // Whitespace is kept so <source> text survives byte for byte; text
    // outside <source> is ignored anyway.
    let mut reader = Reader::from_reader(input);

    let mut report = Report::new();
    let mut buf = Vec::new();

    let mut saw_root = false;
    let mut source_text: Option<String> = None;
    let mut package: Option<Package> = None;
    let mut class: Option<Class> = None;
    let mut method: Option<Method> = None;

    loop {
        let event = reader.read_event_into(&mut buf);
        let is_empty = matches!(&event, Ok(Event::Empty(_)));
        match event {
            Err(e) => {
                return Err(MergeError::Xml {
                    source: e,
                    position: reader.buffer_position(),
                })
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let attrs = attr_map(e, reader.buffer_position())?;
                match e.local_name().as_ref() {
                    b"coverage" => {
                        saw_root = true;
                        report.metrics = metrics(&attrs, "coverage")?;
                        report.lines_covered = numeric(&attrs, "lines-covered", "coverage")?;
                        report.lines_valid = numeric(&attrs, "lines-valid", "coverage")?;
                        report.branches_covered =
                            numeric(&attrs, "branches-covered", "coverage")?;
                        report.branches_valid = numeric(&attrs, "branches-valid", "coverage")?;
                    }
                    b"source" => {
                        // <source/> has no End event, so record it right away.
                        if is_empty {
                            report.sources.push(String::new());
                        } else {
                            source_text = Some(String::new());
                        }
                    }
                    b"package" => {
                        let p = Package {
                            name: text(&attrs, "name"),
                            classes: Vec::new(),
                            metrics: metrics(&attrs, "package")?,
                        };
                        if is_empty {
                            report.packages.push(p);
                        } else {
                            package = Some(p);
                        }
                    }
                    b"class" => {
                        let Some(pkg) = package.as_mut() else {
                            return Err(misplaced("class", "package"));
                        };
                        let c = Class {
                            name: text(&attrs, "name"),
                            filename: text(&attrs, "filename"),
                            methods: Vec::new(),
                            lines: Vec::new(),
                            metrics: metrics(&attrs, "class")?,
                        };
                        if is_empty {
                            pkg.classes.push(c);
                        } else {
                            class = Some(c);
                        }
                    }
                    b"method" => {
                        let Some(cls) = class.as_mut() else {
                            return Err(misplaced("method", "class"));
                        };
                        let m = Method {
                            name: text(&attrs, "name"),
                            signature: text(&attrs, "signature"),
                            lines: Vec::new(),
                            metrics: metrics(&attrs, "method")?,
                        };
                        if is_empty {
                            cls.methods.push(m);
                        } else {
                            method = Some(m);
                        }
                    }
                    b"line" => {
                        let line = Line {
                            number: numeric(&attrs, "number", "line")?,
                            hits: numeric(&attrs, "hits", "line")?,
                        };
                        // A <line> inside a <method> is method-scoped;
                        // otherwise it belongs to the enclosing class.
                        if let Some(m) = method.as_mut() {
                            m.lines.push(line);
                        } else if let Some(c) = class.as_mut() {
                            c.lines.push(line);
                        } else {
                            return Err(misplaced("line", "class"));
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(text) = source_text.as_mut() {
                    let unescaped = e.unescape().map_err(|err| MergeError::Xml {
                        source: err,
                        position: reader.buffer_position(),
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(text) = source_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"source" => {
                    if let Some(text) = source_text.take() {
                        report.sources.push(text);
                    }
                }
                b"method" => {
                    if let (Some(m), Some(c)) = (method.take(), class.as_mut()) {
                        c.methods.push(m);
                    }
                }
                b"class" => {
                    if let (Some(c), Some(p)) = (class.take(), package.as_mut()) {
                        p.classes.push(c);
                    }
                }
                b"package" => {
                    if let Some(p) = package.take() {
                        report.packages.push(p);
                    }
                }
                _ => {}
            },
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(MergeError::Parse(
            "missing <coverage> root element".to_string(),
        ));
    }
    if let Some(open) = [
        method.as_ref().map(|_| "method"),
        class.as_ref().map(|_| "class"),
        package.as_ref().map(|_| "package"),
    ]
    .into_iter()
    .flatten()
    .next()
    {
        return Err(MergeError::Parse(format!(
            "document ended inside an open <{open}> element"
        )));
    }

    Ok(report)
}

fn misplaced(element: &str, parent: &str) -> MergeError {
    MergeError::Parse(format!("<{element}> found outside of a <{parent}>"))
}

fn metrics(attrs: &HashMap<String, String>, element: &str) -> Result<Metrics> {
    Ok(Metrics {
        line_rate: numeric(attrs, "line-rate", element)?,
        branch_rate: numeric(attrs, "branch-rate", element)?,
        complexity: complexity(attrs, element)?,
    })
}

fn text(attrs: &HashMap<String, String>, key: &str) -> String {
    attrs.get(key).cloned().unwrap_or_default()
}

/// Read a numeric attribute, defaulting to zero when it is absent.
fn numeric<T>(attrs: &HashMap<String, String>, key: &str, element: &str) -> Result<T>
where
    T: FromStr + Default,
    T::Err: Display,
{
    match attrs.get(key) {
        None => Ok(T::default()),
        Some(raw) => raw.trim().parse().map_err(|e| {
            MergeError::Parse(format!(
                "invalid {key}=\"{raw}\" on <{element}>: {e}"
            ))
        }),
    }
}

/// Complexity is an integer, but some generators write it as "0.0".
fn complexity(attrs: &HashMap<String, String>, element: &str) -> Result<i64> {
    let Some(raw) = attrs.get("complexity") else {
        return Ok(0);
    };
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(MergeError::Parse(format!(
            "invalid complexity=\"{raw}\" on <{element}>: not an integer"
        ))),
    }
}

/// Extract attributes from an XML element into a HashMap. A malformed
/// attribute or an undecodable value fails the whole document.
fn attr_map(e: &BytesStart, position: usize) -> Result<HashMap<String, String>> {
    let xml_err = |source: quick_xml::Error| MergeError::Xml { source, position };
    e.attributes()
        .map(|a| {
            let attr = a.map_err(|err| xml_err(err.into()))?;
            let key = str::from_utf8(attr.key.local_name().into_inner())
                .map_err(|err| MergeError::Parse(format!("attribute name is not UTF-8: {err}")))?
                .to_string();
            let value = attr.unescape_value().map_err(xml_err)?.to_string();
            Ok((key, value))
        })
        .collect()
}
