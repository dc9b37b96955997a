use std::fs;
use std::path::Path;

use crate::errors::{Result, XmlModError};
use crate::model::{Element, Node};
use crate::{parse, serialize};

/// An in-memory XML document
///
/// A document is created fresh per operation by opening the path given and
/// is owned exclusively by that operation; nothing is cached or shared
/// between calls. Content outside the root element (comments, processing
/// instructions, a DOCTYPE, whitespace) is preserved in `prolog`/`epilog`.
/// The XML declaration is not stored: a UTF-8 declaration is always emitted
/// on write, which together with the targeted substitutions is the only
/// change a rewrite may introduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub prolog: Vec<Node>,
    pub root: Element,
    pub epilog: Vec<Node>,
}

impl Document {
    /// Load and parse the document at `path`
    ///
    /// # Errors
    ///
    /// Returns `Document` if the file cannot be read or is not well-formed.
    pub fn load(path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| XmlModError::Document {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        parse::parse_document(&source, &origin)
    }

    /// Parse a document from a string; `origin` labels parse diagnostics
    ///
    /// # Errors
    ///
    /// Returns `Document` if the source is not well-formed.
    pub fn parse(source: &str, origin: &str) -> Result<Document> {
        parse::parse_document(source, origin)
    }

    /// Serialize the whole document, with an XML declaration, UTF-8
    pub fn to_xml(&self) -> String {
        serialize::document_to_string(self)
    }

    /// Rewrite the document to `path`
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure. The in-memory document is unaffected.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_xml()).map_err(|e| XmlModError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
