//! The value-substitution engine
//!
//! One pass over one document: select elements by tag name anywhere below
//! the root, evaluate a literal or regex match against element text or a
//! named attribute, and record (and, unless previewing, apply) each rewrite.
//!
//! The pipeline is load → transform → serialize: the document is owned by
//! the call, the change log is the immutable result, and the file is only
//! rewritten when at least one change was applied for real.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, XmlModError};
use crate::model::{Document, Element};

/// Which value on a matched element the operation targets
///
/// Selected once at call entry; text and attribute mode are mutually
/// exclusive per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTarget {
    /// The element's leading character data, absent treated as empty
    Text,
    /// The value of the named attribute; elements without it are skipped
    Attribute(String),
}

/// One requested find-and-replace operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Tag name selecting elements anywhere below the root
    pub tag: String,
    /// Literal value to match exactly, or a regex pattern with `use_regex`
    pub old_value: String,
    /// Replacement value, or a template with `\1`-style backreferences
    pub new_value: String,
    pub target: MatchTarget,
    pub use_regex: bool,
}

impl Substitution {
    /// Literal text substitution for `tag`
    pub fn literal(
        tag: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            target: MatchTarget::Text,
            use_regex: false,
        }
    }

    /// Regex text substitution for `tag`
    pub fn pattern(
        tag: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            use_regex: true,
            ..Self::literal(tag, old_value, new_value)
        }
    }

    /// Retarget the operation at the named attribute instead of text
    pub fn on_attribute(mut self, name: impl Into<String>) -> Self {
        self.target = MatchTarget::Attribute(name.into());
        self
    }
}

/// One recorded value rewrite: (previous, new)
///
/// Produced identically by preview and apply passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub previous: String,
    pub new: String,
}

/// Result of one engine pass over one document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modification {
    /// Change records in document order
    pub changes: Vec<Change>,
}

impl Modification {
    /// Number of substitution instances found
    pub fn count(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Match evaluator, compiled once at call entry
#[derive(Debug)]
pub(crate) enum Matcher {
    Literal { old: String, new: String },
    Pattern { regex: Regex, template: String },
}

impl Matcher {
    /// Compile the substitution's matcher
    ///
    /// # Errors
    ///
    /// Returns `Pattern` when regex mode is requested and the pattern does
    /// not compile.
    pub(crate) fn compile(substitution: &Substitution) -> Result<Matcher> {
        if substitution.use_regex {
            let regex = Regex::new(&substitution.old_value).map_err(|e| XmlModError::Pattern {
                pattern: substitution.old_value.clone(),
                message: e.to_string(),
            })?;
            Ok(Matcher::Pattern {
                regex,
                template: translate_template(&substitution.new_value),
            })
        } else {
            Ok(Matcher::Literal {
                old: substitution.old_value.clone(),
                new: substitution.new_value.clone(),
            })
        }
    }

    /// Evaluate one candidate value, returning the rewritten value on match
    ///
    /// Literal mode requires exact equality. Regex mode requires the pattern
    /// to be found anywhere in the candidate, and then substitutes across
    /// the candidate's full value.
    fn rewrite(&self, candidate: &str) -> Option<String> {
        match self {
            Matcher::Literal { old, new } => (candidate == old).then(|| new.clone()),
            Matcher::Pattern { regex, template } => regex
                .is_match(candidate)
                .then(|| regex.replace_all(candidate, template.as_str()).into_owned()),
        }
    }
}

/// Translate a `\1`-style replacement template to the `regex` crate's form
///
/// `\1`..`\99` become `${n}`, `\\` becomes a literal backslash, and `$` is
/// treated as a literal character. Anything else passes through unchanged.
fn translate_template(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(&d) = chars.peek() {
                        if d.is_ascii_digit() {
                            out.push(d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    out.push('}');
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Run a substitution against the document at `path`
///
/// When `preview` is true this is a strict dry run: the change count and
/// records are identical to an apply pass, but neither the in-memory tree
/// nor the file is touched. Otherwise the file is rewritten in place, and
/// only when at least one change was made.
///
/// # Errors
///
/// * `Pattern` - regex mode with an invalid pattern
/// * `Document` - file unreadable or not well-formed
/// * `Io` - rewrite failed (no rollback; treat the operation as failed)
pub fn substitute_file(
    path: impl AsRef<Path>,
    substitution: &Substitution,
    preview: bool,
) -> Result<Modification> {
    let path = path.as_ref();
    let matcher = Matcher::compile(substitution)?;
    let mut document = Document::load(path)?;

    let modification = run(&mut document, substitution, &matcher, !preview);

    if !preview && !modification.is_empty() {
        document.write_to(path)?;
        info!(
            op = "substitute",
            path = %path.display(),
            tag = %substitution.tag,
            changes = modification.count(),
            "document rewritten"
        );
    } else {
        debug!(
            op = "substitute",
            path = %path.display(),
            tag = %substitution.tag,
            changes = modification.count(),
            preview,
            "no write performed"
        );
    }

    Ok(modification)
}

/// Run a substitution against an already-loaded document, mutating it
///
/// The caller decides what to do with the mutated tree; nothing is written
/// to disk here.
///
/// # Errors
///
/// Returns `Pattern` when regex mode is requested and the pattern does not
/// compile.
pub fn substitute_document(
    document: &mut Document,
    substitution: &Substitution,
) -> Result<Modification> {
    let matcher = Matcher::compile(substitution)?;
    Ok(run(document, substitution, &matcher, true))
}

/// Walk the document and evaluate every selected element
///
/// The descendant selector deliberately excludes the root element itself,
/// matching `findall(".//tag")` scope: candidates are elements anywhere
/// strictly below the root.
fn run(
    document: &mut Document,
    substitution: &Substitution,
    matcher: &Matcher,
    apply: bool,
) -> Modification {
    let mut modification = Modification::default();
    for child in document.root.child_elements_mut() {
        visit(child, substitution, matcher, apply, &mut modification);
    }
    modification
}

fn visit(
    element: &mut Element,
    substitution: &Substitution,
    matcher: &Matcher,
    apply: bool,
    modification: &mut Modification,
) {
    if element.name == substitution.tag {
        evaluate(element, substitution, matcher, apply, modification);
    }
    for child in element.child_elements_mut() {
        visit(child, substitution, matcher, apply, modification);
    }
}

fn evaluate(
    element: &mut Element,
    substitution: &Substitution,
    matcher: &Matcher,
    apply: bool,
    modification: &mut Modification,
) {
    match &substitution.target {
        MatchTarget::Text => {
            let candidate = element.text().unwrap_or("").to_string();
            if let Some(new_value) = matcher.rewrite(&candidate) {
                if apply {
                    element.set_text(new_value.clone());
                }
                modification.changes.push(Change {
                    previous: candidate,
                    new: new_value,
                });
            }
        }
        MatchTarget::Attribute(name) => {
            // Elements lacking the attribute are skipped, not matched
            let Some(candidate) = element.attribute(name).map(str::to_string) else {
                return;
            };
            if let Some(new_value) = matcher.rewrite(&candidate) {
                if apply {
                    element.set_attribute(name, new_value.clone());
                }
                modification.changes.push(Change {
                    previous: candidate,
                    new: new_value,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_template_backreferences() {
        assert_eq!(translate_template(r"\1-\2"), "${1}-${2}");
        assert_eq!(translate_template(r"\12x"), "${12}x");
    }

    #[test]
    fn test_translate_template_dollar_is_literal() {
        assert_eq!(translate_template("price: $5"), "price: $$5");
    }

    #[test]
    fn test_translate_template_escaped_backslash() {
        assert_eq!(translate_template(r"a\\1"), r"a\1");
        assert_eq!(translate_template(r"plain\x"), r"plain\x");
    }

    #[test]
    fn test_matcher_literal_requires_exact_equality() {
        let matcher = Matcher::compile(&Substitution::literal("t", "10", "20")).unwrap();
        assert_eq!(matcher.rewrite("10"), Some("20".to_string()));
        assert_eq!(matcher.rewrite("100"), None);
        assert_eq!(matcher.rewrite(" 10"), None);
    }

    #[test]
    fn test_matcher_pattern_is_substring_search() {
        let matcher = Matcher::compile(&Substitution::pattern("t", "na", "X")).unwrap();
        assert_eq!(matcher.rewrite("banana"), Some("baXX".to_string()));
        assert_eq!(matcher.rewrite("zzz"), None);
    }

    #[test]
    fn test_matcher_pattern_backreference() {
        let matcher =
            Matcher::compile(&Substitution::pattern("t", r"(\d+)-(\d+)", r"\2-\1")).unwrap();
        assert_eq!(matcher.rewrite("12-34"), Some("34-12".to_string()));
    }

    #[test]
    fn test_compile_invalid_pattern_is_pattern_error() {
        let err = Matcher::compile(&Substitution::pattern("t", "[", "x")).unwrap_err();
        assert!(matches!(err, XmlModError::Pattern { ref pattern, .. } if pattern == "["));
    }

    #[test]
    fn test_root_element_is_not_a_candidate() {
        let mut doc = Document::parse("<price>10</price>", "<test>").unwrap();
        let result =
            substitute_document(&mut doc, &Substitution::literal("price", "10", "20")).unwrap();

        assert_eq!(result.count(), 0);
        assert_eq!(doc.root.text(), Some("10"));
    }

    #[test]
    fn test_substitute_document_matches_descendants_at_any_depth() {
        let mut doc = Document::parse(
            "<root><a><price>10</price></a><price>10</price></root>",
            "<test>",
        )
        .unwrap();
        let result =
            substitute_document(&mut doc, &Substitution::literal("price", "10", "20")).unwrap();

        assert_eq!(result.count(), 2);
        assert_eq!(
            result.changes,
            vec![
                Change {
                    previous: "10".to_string(),
                    new: "20".to_string()
                };
                2
            ]
        );
    }

    #[test]
    fn test_missing_text_matches_as_empty_string() {
        let mut doc = Document::parse("<root><flag/></root>", "<test>").unwrap();
        let result =
            substitute_document(&mut doc, &Substitution::literal("flag", "", "set")).unwrap();

        assert_eq!(result.count(), 1);
        let flag = doc.root.child_elements().next().unwrap();
        assert_eq!(flag.text(), Some("set"));
    }
}
