//! Error types for the SVG document model.

use thiserror::Error;

/// Errors that can occur while reading or writing an SVG document.
#[derive(Error, Debug)]
pub enum SvgError {
    /// The underlying XML reader or writer rejected the input.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// An attribute could not be tokenized (duplicate key, missing quote, ...).
    #[error("Invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A closing tag appeared with no element open.
    #[error("Unexpected closing tag </{found}>")]
    UnexpectedClose {
        /// Name of the stray closing tag.
        found: String,
    },
    /// End of input was reached while an element was still open.
    #[error("Element <{name}> is never closed")]
    Unclosed {
        /// Name of the innermost element left open.
        name: String,
    },
    /// Input contained no element at all.
    #[error("Document has no root element")]
    MissingRoot,
    #[error("Serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
