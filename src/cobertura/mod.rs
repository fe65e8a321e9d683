//! Cobertura XML codec: `parse` turns a document into a [`Report`], `to_xml`
//! turns a report back into a document.
//!
//! [`Report`]: crate::model::Report

mod parse;
mod write;

pub use parse::parse;
pub use write::to_xml;
