//! Owned HTML node tree

/// A node in a parsed HTML fragment.
///
/// Comments, doctypes, and processing instructions are dropped during
/// conversion; only elements and text survive.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    /// An element with tag name, attributes, and children
    Element(HtmlElement),
    /// A text node with its raw string content
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlElement {
    /// Lowercased tag name (e.g. "p", "strong")
    pub tag: String,
    /// Attributes in document order
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    /// Create an element with no attributes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value, case-insensitively
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check the tag name, case-insensitively
    pub fn tag_is(&self, name: &str) -> bool {
        self.tag.eq_ignore_ascii_case(name)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

impl HtmlNode {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&HtmlElement> {
        match self {
            HtmlNode::Element(el) => Some(el),
            HtmlNode::Text(_) => None,
        }
    }

    /// The text content, if this node is a text node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            HtmlNode::Text(t) => Some(t),
            HtmlNode::Element(_) => None,
        }
    }
}

fn collect_text(nodes: &[HtmlNode], out: &mut String) {
    for node in nodes {
        match node {
            HtmlNode::Text(t) => out.push_str(t),
            HtmlNode::Element(el) => collect_text(&el.children, out),
        }
    }
}
