//! An owned, editable document model for SVG map files.
//!
//! Documents are read with `quick-xml` into a plain tree of [`Element`]s and
//! [`Node`]s. The tree can be queried in document order, edited (attributes
//! and children are ordinary `Vec`s), and written back out as XML.

mod document;
mod element;
mod entity;
mod error;
pub mod style;

pub use document::{Declaration, Document, Node};
pub use element::{Descendants, Element, LABEL_ATTR};
pub use error::SvgError;
