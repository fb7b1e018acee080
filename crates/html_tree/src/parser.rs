//! Fragment parsing via html5ever
//!
//! Parsing is browser-grade lenient: malformed or partial markup never
//! raises. Input that yields no usable nodes degrades to an empty tree so
//! downstream builders emit "no content" instead of aborting an export.

use crate::{HtmlElement, HtmlNode};
use html5ever::tendril::TendrilSink;
use html5ever::{local_name, namespace_url, ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment string into top-level nodes.
pub fn parse_html_fragment(html: &str) -> Vec<HtmlNode> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let dom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("div")),
        Vec::new(),
    )
    .one(html);

    // The fragment parser wraps content in a synthetic <html> root.
    let document = &dom.document;
    let children = document.children.borrow();
    let Some(root) = children
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
    else {
        tracing::warn!("html fragment produced no root element; treating as empty");
        return Vec::new();
    };

    convert_children(root)
}

fn convert_children(handle: &Handle) -> Vec<HtmlNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<HtmlNode> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            Some(HtmlNode::Element(HtmlElement {
                tag,
                attrs,
                children: convert_children(handle),
            }))
        }
        NodeData::Text { contents } => Some(HtmlNode::Text(contents.borrow().to_string())),
        // Comments, doctypes, and processing instructions carry nothing
        // the exporters render.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_paragraph() {
        let nodes = parse_html_fragment("<p>Hello</p>");
        assert_eq!(nodes.len(), 1);
        let el = nodes[0].as_element().unwrap();
        assert_eq!(el.tag, "p");
        assert_eq!(el.text_content(), "Hello");
    }

    #[test]
    fn test_parse_preserves_attributes() {
        let nodes = parse_html_fragment(r#"<p style="text-align: center">x</p>"#);
        let el = nodes[0].as_element().unwrap();
        assert_eq!(el.attr("style"), Some("text-align: center"));
    }

    #[test]
    fn test_parse_tolerates_unclosed_tags() {
        let nodes = parse_html_fragment("<p>first<p>second");
        let tags: Vec<&str> = nodes
            .iter()
            .filter_map(|n| n.as_element())
            .map(|e| e.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["p", "p"]);
    }

    #[test]
    fn test_parse_empty_input_yields_empty_tree() {
        assert!(parse_html_fragment("").is_empty());
        assert!(parse_html_fragment("   \n  ").is_empty());
    }

    #[test]
    fn test_parse_drops_comments() {
        let nodes = parse_html_fragment("<!-- note --><p>x</p>");
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].as_element().is_some());
    }

    #[test]
    fn test_parse_nested_inline_structure() {
        let nodes = parse_html_fragment("<p><strong>a<em>b</em></strong></p>");
        let p = nodes[0].as_element().unwrap();
        let strong = p.children[0].as_element().unwrap();
        assert_eq!(strong.tag, "strong");
        assert_eq!(strong.children.len(), 2);
        let em = strong.children[1].as_element().unwrap();
        assert_eq!(em.tag, "em");
    }

    #[test]
    fn test_parse_table_structure_survives() {
        let nodes =
            parse_html_fragment("<table><tr><th>H</th></tr><tr><td>D</td></tr></table>");
        let table = nodes[0].as_element().unwrap();
        assert_eq!(table.tag, "table");
        // html5ever inserts the implied tbody, like a browser does.
        assert_eq!(table.text_content(), "HD");
    }
}
