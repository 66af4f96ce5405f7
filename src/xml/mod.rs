//! Locked-down XML parsing for untrusted documents
//!
//! Bodies are read with `quick_xml` into a small element tree. The reader never
//! processes a DTD: a `<!DOCTYPE ...>` declaration aborts the parse with
//! [`XmlError::Doctype`] before anything after it is read. Only the five
//! predefined entities and character references are ever expanded, so
//! entity-expansion and external-entity attacks have nothing to work with.

mod document;

pub use document::{parse_document, Document, Element, Node};

use thiserror::Error;

/// Deepest element nesting accepted before the document is rejected
pub const MAX_NESTING_DEPTH: usize = 256;

/// Errors produced while reading an XML body
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("document is empty")]
    Empty,

    #[error("document declares a DOCTYPE")]
    Doctype,

    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Result type for XML operations
pub type XmlResult<T> = Result<T, XmlError>;
