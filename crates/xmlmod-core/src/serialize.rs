//! Document serialization
//!
//! Writes a [`Document`](crate::model::Document) tree back out as XML. The
//! writer is deliberately dumb: no indentation, no reordering, no wrapping.
//! Apart from re-escaping character data and attribute values, output is the
//! tree exactly as parsed, prefixed with a UTF-8 XML declaration.

use crate::model::{Document, Element, Node};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Serialize the whole document, declaration included
pub(crate) fn document_to_string(document: &Document) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    for node in &document.prolog {
        write_node(&mut out, node);
    }
    write_element(&mut out, &document.root);
    for node in &document.epilog {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::CData(content) => {
            out.push_str("<![CDATA[");
            out.push_str(content);
            out.push_str("]]>");
        }
        Node::Comment(content) => {
            out.push_str("<!--");
            out.push_str(content);
            out.push_str("-->");
        }
        Node::ProcessingInstruction(content) => {
            out.push_str("<?");
            out.push_str(content);
            out.push_str("?>");
        }
        Node::DocType(content) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(content);
            out.push('>');
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&attr.value));
        out.push('"');
    }

    if element.children.is_empty() && element.self_closing {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_escape_attribute_quotes() {
        assert_eq!(escape_attribute("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_self_closing_element() {
        let mut out = String::new();
        let mut element = Element::new("a");
        element.self_closing = true;
        write_element(&mut out, &element);
        assert_eq!(out, "<a/>");
    }

    #[test]
    fn test_self_closing_expands_once_it_has_children() {
        let mut out = String::new();
        let mut element = Element::new("a");
        element.self_closing = true;
        element.set_text("x");
        write_element(&mut out, &element);
        assert_eq!(out, "<a>x</a>");
    }

    #[test]
    fn test_element_with_attributes_in_order() {
        let mut out = String::new();
        let mut element = Element::new("item");
        element.attributes.push(Attribute {
            name: "b".to_string(),
            value: "2".to_string(),
        });
        element.attributes.push(Attribute {
            name: "a".to_string(),
            value: "1".to_string(),
        });
        write_element(&mut out, &element);
        assert_eq!(out, "<item b=\"2\" a=\"1\"></item>");
    }

    #[test]
    fn test_cdata_and_comment_verbatim() {
        let mut out = String::new();
        write_node(&mut out, &Node::CData("a < b".to_string()));
        write_node(&mut out, &Node::Comment(" note ".to_string()));
        assert_eq!(out, "<![CDATA[a < b]]><!-- note -->");
    }
}
