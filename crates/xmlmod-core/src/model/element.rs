/// One attribute on an element
///
/// Attributes are kept as an ordered list, not a map, so that writing a
/// document back preserves the order they appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One node in a document tree
///
/// Everything the parser sees is kept, including inter-element whitespace
/// (as `Text`), comments, CDATA sections and processing instructions, so
/// that untouched content round-trips byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, stored unescaped
    Text(String),
    /// CDATA section content, emitted verbatim
    CData(String),
    /// Comment content between `<!--` and `-->`, emitted verbatim
    Comment(String),
    /// Processing instruction content between `<?` and `?>`
    ProcessingInstruction(String),
    /// DOCTYPE content between `<!DOCTYPE ` and `>`
    DocType(String),
}

/// One XML element: a tag name, ordered attributes, and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name; invariant: non-empty
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Whether the element was written as `<tag/>` in the source.
    /// Only honored on write when the element still has no children.
    pub self_closing: bool,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Leading character data of this element
    ///
    /// Returns the first child when it is a text node, else `None`. This is
    /// deliberately the narrow "text immediately after the start tag" reading
    /// of element text: `<a><b/>tail</a>` has no text, `<a>x<b/></a>` has
    /// text `x`. Match candidates default missing text to the empty string.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Replace the leading character data, inserting a text node if absent
    pub fn set_text(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.children.first_mut() {
            Some(Node::Text(text)) => *text = value,
            _ => self.children.insert(0, Node::Text(value)),
        }
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set the named attribute, replacing in place or appending
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Iterate over direct element children, skipping text and other nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Mutable variant of [`child_elements`](Self::child_elements)
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }
}
