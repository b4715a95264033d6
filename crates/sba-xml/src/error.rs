use thiserror::Error;

/// Failure reading, parsing or writing an XML document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("serialized document is not valid UTF-8: {0}")]
    Output(#[from] std::string::FromUtf8Error),
    #[error("unknown entity reference &{0};")]
    UnknownEntity(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element (second is <{0}>)")]
    MultipleRoots(String),
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("closing tag without a matching opening tag")]
    UnbalancedEnd,
}

/// Failure reordering a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("unknown child <{child}> under <{parent}>")]
    UnknownChild { parent: String, child: String },
}
