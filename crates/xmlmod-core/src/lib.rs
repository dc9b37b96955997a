//! xmlmod core - XML tag/attribute value-substitution engine
//!
//! This crate provides the engine behind the xmlmod frontends:
//! - Owned document model with full node fidelity (whitespace, comments,
//!   CDATA, processing instructions round-trip untouched)
//! - Literal and regex substitution against element text or a named
//!   attribute, with a strict preview mode and per-change records
//! - Well-formedness validation
//! - Tag/attribute name enumeration in first-occurrence order
//! - Distinct-value enumeration for a tag
//! - Non-recursive directory listing and continue-and-collect batch runs
//!
//! Every operation opens its document fresh from the path given and owns it
//! for the duration of the call; there is no shared state between calls.

pub mod errors;
pub mod logging;
pub mod model;
pub mod ops;

mod parse;
mod serialize;

// Re-export commonly used types
pub use errors::{Result, XmlModError};
pub use model::{Attribute, Document, Element, Node};
pub use ops::batch::{substitute_all, xml_files_in, BatchReport, FileReport};
pub use ops::enumerate::{unique_tags, unique_tags_and_attributes, unique_values};
pub use ops::substitute::{
    substitute_document, substitute_file, Change, MatchTarget, Modification, Substitution,
};
pub use ops::validate::validate;
