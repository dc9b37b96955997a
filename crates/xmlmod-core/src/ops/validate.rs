//! Well-formedness check

use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::model::Document;

/// Check that the document at `path` parses
///
/// Pure read: nothing is cached, written, or retained.
///
/// # Errors
///
/// Returns `Document` carrying the parse diagnostic if the file is
/// unreadable or not well-formed.
pub fn validate(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    Document::load(path)?;
    debug!(op = "validate", path = %path.display(), "document is well-formed");
    Ok(())
}
