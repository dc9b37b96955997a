//! Document introspection helpers
//!
//! These feed selection widgets in calling frontends: which tag names exist
//! in a document, and which distinct values a given tag currently holds.
//! Name enumeration preserves first-occurrence order (callers sort for
//! display, but rely on names being unique); value enumeration has no
//! meaningful order and returns a sorted set.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexSet;

use crate::errors::Result;
use crate::model::{Document, Element};

/// Distinct element tag names, depth-first pre-order, first occurrence first
///
/// The root's own tag is included: `<root><a/><b><a/></b></root>` yields
/// `["root", "a", "b"]`.
///
/// # Errors
///
/// Returns `Document` if the file cannot be read or parsed.
pub fn unique_tags(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let document = Document::load(path)?;
    let mut names = IndexSet::new();
    collect_names(&document.root, false, &mut names);
    Ok(names.into_iter().collect())
}

/// Distinct tag names and attribute names, interleaved per visit
///
/// Same traversal as [`unique_tags`], but each visited element contributes
/// its tag name followed by its attribute names, first occurrence only.
///
/// # Errors
///
/// Returns `Document` if the file cannot be read or parsed.
pub fn unique_tags_and_attributes(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let document = Document::load(path)?;
    let mut names = IndexSet::new();
    collect_names(&document.root, true, &mut names);
    Ok(names.into_iter().collect())
}

fn collect_names(element: &Element, with_attributes: bool, names: &mut IndexSet<String>) {
    names.insert(element.name.clone());
    if with_attributes {
        for attr in &element.attributes {
            names.insert(attr.name.clone());
        }
    }
    for child in element.child_elements() {
        collect_names(child, with_attributes, names);
    }
}

/// Distinct trimmed text values under all elements matching `tag`
///
/// Uses the same descendant selector as the substitution engine (the root
/// element itself is not a candidate). Elements with absent or blank text
/// contribute nothing; duplicates collapse.
///
/// # Errors
///
/// Returns `Document` if the file cannot be read or parsed.
pub fn unique_values(path: impl AsRef<Path>, tag: &str) -> Result<BTreeSet<String>> {
    let document = Document::load(path)?;
    let mut values = BTreeSet::new();
    for child in document.root.child_elements() {
        collect_values(child, tag, &mut values);
    }
    Ok(values)
}

fn collect_values(element: &Element, tag: &str, values: &mut BTreeSet<String>) {
    if element.name == tag {
        if let Some(text) = element.text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                values.insert(trimmed.to_string());
            }
        }
    }
    for child in element.child_elements() {
        collect_values(child, tag, values);
    }
}
