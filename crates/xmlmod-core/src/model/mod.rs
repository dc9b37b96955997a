pub mod document;
pub mod element;

pub use document::Document;
pub use element::{Attribute, Element, Node};
