//! Document tree construction
//!
//! Builds the owned [`Document`](crate::model::Document) tree from a
//! `quick-xml` pull reader. Nothing is trimmed or normalized on the way in:
//! inter-element whitespace, comments, CDATA and processing instructions all
//! land in the tree so a rewrite can reproduce them verbatim.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::{Result, XmlModError};
use crate::model::{Attribute, Document, Element, Node};

/// Parse a complete document from `source`
///
/// `origin` (a path, or a placeholder for in-memory input) labels all
/// diagnostics.
///
/// # Errors
///
/// Returns `Document` for anything that is not one well-formed root element
/// with optional surrounding comments, PIs, a DOCTYPE, and whitespace.
pub(crate) fn parse_document(source: &str, origin: &str) -> Result<Document> {
    // A UTF-8 BOM would otherwise surface as character data before the root
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut reader = Reader::from_str(source);

    let mut prolog: Vec<Node> = Vec::new();
    let mut epilog: Vec<Node> = Vec::new();
    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::new();
    // The original declaration is replaced on write; its trailing newline
    // belongs to it, so the first whitespace run after it is swallowed too.
    let mut swallow_decl_ws = false;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| malformed(origin, position, e.to_string()))?;

        match event {
            Event::Decl(_) => {
                swallow_decl_ws = true;
                continue;
            }

            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed(
                        origin,
                        position,
                        "more than one root element".to_string(),
                    ));
                }
                stack.push(element_from_start(&start, false, origin, position)?);
            }

            Event::Empty(start) => {
                let element = element_from_start(&start, true, origin, position)?;
                place_element(element, &mut stack, &mut root, origin, position)?;
            }

            Event::End(_) => {
                // quick-xml has already verified the closing name matches
                let element = stack.pop().ok_or_else(|| {
                    malformed(origin, position, "unexpected closing tag".to_string())
                })?;
                place_element(element, &mut stack, &mut root, origin, position)?;
            }

            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map_err(|e| malformed(origin, position, e.to_string()))?
                    .into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(content));
                } else if content.trim().is_empty() {
                    if !(swallow_decl_ws && root.is_none() && prolog.is_empty()) {
                        place_outside(Node::Text(content), &mut prolog, &mut epilog, &root);
                    }
                } else {
                    return Err(malformed(
                        origin,
                        position,
                        "character data outside the root element".to_string(),
                    ));
                }
            }

            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::CData(content)),
                    None => {
                        return Err(malformed(
                            origin,
                            position,
                            "character data outside the root element".to_string(),
                        ))
                    }
                }
            }

            Event::Comment(comment) => {
                let content = String::from_utf8_lossy(&comment.into_inner()).into_owned();
                let node = Node::Comment(content);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => place_outside(node, &mut prolog, &mut epilog, &root),
                }
            }

            Event::PI(pi) => {
                let content = String::from_utf8_lossy(&pi.into_inner()).into_owned();
                let node = Node::ProcessingInstruction(content);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => place_outside(node, &mut prolog, &mut epilog, &root),
                }
            }

            Event::DocType(doctype) => {
                let content = String::from_utf8_lossy(&doctype.into_inner())
                    .trim()
                    .to_string();
                if stack.is_empty() && root.is_none() {
                    prolog.push(Node::DocType(content));
                } else {
                    return Err(malformed(
                        origin,
                        position,
                        "misplaced DOCTYPE".to_string(),
                    ));
                }
            }

            Event::Eof => {
                if let Some(open) = stack.last() {
                    return Err(malformed(
                        origin,
                        position,
                        format!("unexpected end of document inside <{}>", open.name),
                    ));
                }
                break;
            }
        }

        swallow_decl_ws = false;
    }

    let root = root.ok_or_else(|| {
        malformed(
            origin,
            reader.buffer_position(),
            "no root element".to_string(),
        )
    })?;

    Ok(Document {
        prolog,
        root,
        epilog,
    })
}

fn malformed(origin: &str, position: usize, message: String) -> XmlModError {
    XmlModError::Document {
        path: origin.to_string(),
        message: format!("{} at position {}", message, position),
    }
}

fn element_from_start(
    start: &BytesStart,
    self_closing: bool,
    origin: &str,
    position: usize,
) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(origin, position, e.to_string()))?;
        let attr_name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(origin, position, e.to_string()))?
            .into_owned();
        attributes.push(Attribute {
            name: attr_name,
            value,
        });
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        self_closing,
    })
}

/// Attach a completed element to its parent, or install it as the root
fn place_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    origin: &str,
    position: usize,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(malformed(
                    origin,
                    position,
                    "more than one root element".to_string(),
                ));
            }
            *root = Some(element);
            Ok(())
        }
    }
}

fn place_outside(node: Node, prolog: &mut Vec<Node>, epilog: &mut Vec<Node>, root: &Option<Element>) {
    if root.is_some() {
        epilog.push(node);
    } else {
        prolog.push(node);
    }
}
