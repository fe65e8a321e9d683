use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error at position {position}: {source}")]
    Xml {
        source: quick_xml::Error,
        position: usize,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("XML encode error: {0}")]
    Encode(#[source] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, MergeError>;
