//! Inline style resolution
//!
//! Walks the inline descendants of a block node, threading an immutable
//! `{bold, italic, underline}` context downward. Child recursion derives
//! new context values; there is no shared mutable accumulator, so style
//! state can never leak across sibling branches.

use crate::{HtmlElement, HtmlNode};

/// Inline formatting context active at a point in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl InlineStyle {
    /// Derive a context with bold set
    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Derive a context with italic set
    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    /// Derive a context with underline set
    pub fn with_underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }
}

/// One styled run of text emitted for a text leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    /// Raw text of the leaf (may be empty for synthesized runs)
    pub text: String,
    /// Formatting context active at the leaf
    pub style: InlineStyle,
    /// Font size hint in points, when the caller requested one
    pub size: Option<f32>,
    /// Whether a line break precedes this run (from an inline `<br>`)
    pub break_before: bool,
}

impl StyledRun {
    /// A plain run with the given text and style
    pub fn new(text: impl Into<String>, style: InlineStyle, size: Option<f32>) -> Self {
        Self {
            text: text.into(),
            style,
            size,
            break_before: false,
        }
    }

    /// The synthesized empty run used when a block yields no content
    pub fn empty(size: Option<f32>) -> Self {
        Self::new("", InlineStyle::default(), size)
    }

    /// A run that only carries a line break
    pub fn line_break(size: Option<f32>) -> Self {
        Self {
            text: String::new(),
            style: InlineStyle::default(),
            size,
            break_before: true,
        }
    }
}

/// Block alignment resolved from an inline `style` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Resolve the alignment of a block element.
///
/// Only `text-align: center` and `text-align: right` are honored; every
/// other value (including none) maps to left.
pub fn alignment_of(element: &HtmlElement) -> Alignment {
    let Some(style) = element.attr("style") else {
        return Alignment::Left;
    };
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let property = parts.next().unwrap_or("").trim();
        if !property.eq_ignore_ascii_case("text-align") {
            continue;
        }
        let value = parts.next().unwrap_or("").trim();
        if value.eq_ignore_ascii_case("center") {
            return Alignment::Center;
        }
        if value.eq_ignore_ascii_case("right") {
            return Alignment::Right;
        }
        return Alignment::Left;
    }
    Alignment::Left
}

/// Collect the styled runs of a block element's inline content.
///
/// Always yields at least one run: a block with no usable content gets a
/// single synthesized empty run so the output paragraph is never a
/// zero-element failure.
pub fn runs_for_block(element: &HtmlElement, ctx: InlineStyle, size: Option<f32>) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    collect_runs(&element.children, ctx, size, &mut runs);
    if runs.is_empty() {
        runs.push(StyledRun::empty(size));
    }
    runs
}

fn collect_runs(nodes: &[HtmlNode], ctx: InlineStyle, size: Option<f32>, out: &mut Vec<StyledRun>) {
    let sole_child = nodes.len() == 1;
    for node in nodes {
        match node {
            HtmlNode::Text(text) => {
                // Whitespace-only leaves are kept only when they are the
                // sole content of their parent (an intentional blank line).
                if text.trim().is_empty() && !sole_child {
                    continue;
                }
                out.push(StyledRun::new(text.clone(), ctx, size));
            }
            HtmlNode::Element(el) => match el.tag.as_str() {
                "strong" | "b" => collect_runs(&el.children, ctx.with_bold(), size, out),
                "em" | "i" => collect_runs(&el.children, ctx.with_italic(), size, out),
                "u" => collect_runs(&el.children, ctx.with_underline(), size, out),
                "br" => out.push(StyledRun::line_break(size)),
                // Unknown inline wrappers are transparent containers.
                _ => collect_runs(&el.children, ctx, size, out),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_html_fragment;

    fn block(html: &str) -> HtmlElement {
        parse_html_fragment(html)
            .into_iter()
            .find_map(|n| match n {
                HtmlNode::Element(el) => Some(el),
                HtmlNode::Text(_) => None,
            })
            .unwrap()
    }

    #[test]
    fn test_bold_applies_to_subtree_only() {
        let p = block("<p>plain <strong>bold</strong> tail</p>");
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        assert_eq!(runs.len(), 3);
        assert!(!runs[0].style.bold);
        assert!(runs[1].style.bold);
        assert!(!runs[2].style.bold, "bold must not leak to the sibling after the subtree");
    }

    #[test]
    fn test_nested_styles_accumulate() {
        let p = block("<p><strong><em><u>x</u></em></strong></p>");
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0].style,
            InlineStyle {
                bold: true,
                italic: true,
                underline: true
            }
        );
    }

    #[test]
    fn test_b_and_i_aliases() {
        let p = block("<p><b>a</b><i>b</i></p>");
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        assert!(runs[0].style.bold);
        assert!(runs[1].style.italic);
    }

    #[test]
    fn test_unknown_inline_element_is_transparent() {
        let p = block(r#"<p><span><strong>x</strong></span></p>"#);
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].style.bold);
    }

    #[test]
    fn test_whitespace_between_siblings_is_dropped() {
        let p = block("<p><strong>a</strong>   <strong>b</strong></p>");
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_sole_whitespace_child_is_kept() {
        let p = block("<p> </p>");
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, " ");
    }

    #[test]
    fn test_empty_block_synthesizes_one_empty_run() {
        let p = block("<p></p>");
        let runs = runs_for_block(&p, InlineStyle::default(), Some(11.0));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "");
        assert_eq!(runs[0].size, Some(11.0));
    }

    #[test]
    fn test_inline_br_emits_break_run() {
        let p = block("<p>a<br>b</p>");
        let runs = runs_for_block(&p, InlineStyle::default(), None);
        assert_eq!(runs.len(), 3);
        assert!(runs[1].break_before);
        assert_eq!(runs[2].text, "b");
    }

    #[test]
    fn test_size_hint_is_threaded_to_every_run() {
        let p = block("<p>a<strong>b</strong></p>");
        let runs = runs_for_block(&p, InlineStyle::default(), Some(18.0));
        assert!(runs.iter().all(|r| r.size == Some(18.0)));
    }

    #[test]
    fn test_alignment_parsing() {
        assert_eq!(alignment_of(&block(r#"<p style="text-align: center">x</p>"#)), Alignment::Center);
        assert_eq!(alignment_of(&block(r#"<p style="text-align:right">x</p>"#)), Alignment::Right);
        assert_eq!(alignment_of(&block(r#"<p style="text-align: justify">x</p>"#)), Alignment::Left);
        assert_eq!(alignment_of(&block(r#"<p style="color: red">x</p>"#)), Alignment::Left);
        assert_eq!(alignment_of(&block("<p>x</p>")), Alignment::Left);
    }
}
