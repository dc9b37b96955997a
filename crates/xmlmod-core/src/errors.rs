use thiserror::Error;

/// Result type alias using XmlModError
pub type Result<T> = std::result::Result<T, XmlModError>;

/// Error taxonomy for xmlmod operations
///
/// Every error is terminal for the single document being processed; there is
/// no internal retry. The `Display` rendering is the message shown to callers
/// across the boundary, so each variant must read as one self-contained,
/// human-readable sentence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlModError {
    /// Document could not be read or is not well-formed XML
    #[error("Malformed XML in {path}: {message}")]
    Document { path: String, message: String },

    /// Regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Rewriting the document to disk failed
    ///
    /// The in-memory document was already mutated when this is returned.
    /// The document value is owned by the failed call, so no caller-visible
    /// state is affected; the call as a whole must be treated as failed.
    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },
}
