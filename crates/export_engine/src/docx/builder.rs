//! HTML to DOCX block builder
//!
//! Walks each section's parsed HTML tree and maps block-level nodes onto
//! [`DocxBlock`]s. Local structural problems (a malformed table) are
//! absorbed here: the offending node is skipped with a warning and the
//! rest of the document continues to build.

use crate::docx::ast::{
    DocxBlock, DocxParagraph, DocxRun, DocxTable, DocxTableCell, DocxTableRow, HeadingLevel,
};
use doc_model::{AttachedDocument, Document};
use html_tree::{
    alignment_of, parse_html_fragment, runs_for_block, Alignment, HtmlElement, HtmlNode,
    InlineStyle, StyledRun,
};

/// Accent color for appendix attachment names (hex RGB, no `#`)
const ATTACHMENT_NAME_COLOR: &str = "2E74B5";

/// Build the complete block sequence for a document.
///
/// Before every section except the first, an explicit page-break block is
/// inserted. If attachments exist, the appendix follows the last section
/// on its own page.
pub fn build_blocks(document: &Document, attachments: &[AttachedDocument]) -> Vec<DocxBlock> {
    let mut blocks = Vec::new();

    for (index, section) in document.ordered_sections().into_iter().enumerate() {
        if index > 0 {
            blocks.push(DocxBlock::PageBreak);
        }
        let before = blocks.len();
        let nodes = parse_html_fragment(&section.content);
        build_nodes(&nodes, &mut blocks);
        if blocks.len() == before {
            // An empty section still yields one paragraph with one empty
            // run, never zero elements.
            blocks.push(DocxBlock::Paragraph(DocxParagraph::empty()));
        }
    }

    if !attachments.is_empty() {
        build_appendix(attachments, &mut blocks);
    }

    blocks
}

fn build_nodes(nodes: &[HtmlNode], blocks: &mut Vec<DocxBlock>) {
    for node in nodes {
        match node {
            HtmlNode::Text(text) => {
                // Stray non-empty text at block level becomes a plain
                // paragraph.
                if !text.trim().is_empty() {
                    let run = StyledRun::new(text.clone(), InlineStyle::default(), None);
                    blocks.push(DocxBlock::Paragraph(DocxParagraph::body(
                        vec![run.into()],
                        Alignment::Left,
                    )));
                }
            }
            HtmlNode::Element(el) => build_element(el, blocks),
        }
    }
}

fn build_element(el: &HtmlElement, blocks: &mut Vec<DocxBlock>) {
    if let Some(level) = HeadingLevel::from_tag(&el.tag) {
        let runs = runs_for_block(
            el,
            InlineStyle::default().with_bold(),
            Some(level.size_points()),
        );
        blocks.push(DocxBlock::Paragraph(DocxParagraph::heading(
            level,
            runs.into_iter().map(DocxRun::from).collect(),
            alignment_of(el),
        )));
        return;
    }

    match el.tag.as_str() {
        "p" => {
            let runs = runs_for_block(el, InlineStyle::default(), None);
            blocks.push(DocxBlock::Paragraph(DocxParagraph::body(
                runs.into_iter().map(DocxRun::from).collect(),
                alignment_of(el),
            )));
        }
        "ul" => build_list(el, false, blocks),
        "ol" => build_list(el, true, blocks),
        "table" => match build_table(el) {
            Some(table) => blocks.push(DocxBlock::Table(table)),
            None => {
                tracing::warn!("skipping table with no extractable rows");
            }
        },
        "br" => blocks.push(DocxBlock::Paragraph(DocxParagraph::empty())),
        // Any other element is a transparent container.
        _ => build_nodes(&el.children, blocks),
    }
}

/// One paragraph per direct `li` child; nested lists are not expanded
/// into deeper indent levels.
fn build_list(el: &HtmlElement, ordered: bool, blocks: &mut Vec<DocxBlock>) {
    for child in &el.children {
        let Some(li) = child.as_element() else { continue };
        if !li.tag_is("li") {
            continue;
        }
        let runs: Vec<DocxRun> = runs_for_block(li, InlineStyle::default(), None)
            .into_iter()
            .map(DocxRun::from)
            .collect();
        let paragraph = if ordered {
            DocxParagraph::numbered_item(runs)
        } else {
            DocxParagraph::bullet_item(runs)
        };
        blocks.push(DocxBlock::Paragraph(paragraph));
    }
}

/// Extract a table, or `None` when no usable rows exist.
fn build_table(el: &HtmlElement) -> Option<DocxTable> {
    let mut rows = Vec::new();
    collect_rows(el, &mut rows);
    if rows.is_empty() {
        return None;
    }
    Some(DocxTable { rows })
}

fn collect_rows(el: &HtmlElement, rows: &mut Vec<DocxTableRow>) {
    for child in &el.children {
        let Some(child_el) = child.as_element() else { continue };
        match child_el.tag.as_str() {
            "thead" | "tbody" | "tfoot" => collect_rows(child_el, rows),
            "tr" => {
                let cell_elements: Vec<&HtmlElement> = child_el
                    .children
                    .iter()
                    .filter_map(|c| c.as_element())
                    .filter(|c| c.tag_is("td") || c.tag_is("th"))
                    .collect();
                if cell_elements.is_empty() {
                    continue;
                }
                // Every cell in a row shares an equal slice of the width.
                let width_pct = 100.0 / cell_elements.len() as f32;
                let cells = cell_elements
                    .into_iter()
                    .map(|cell_el| DocxTableCell {
                        runs: runs_for_block(cell_el, InlineStyle::default(), None)
                            .into_iter()
                            .map(DocxRun::from)
                            .collect(),
                        header: cell_el.tag_is("th"),
                        width_pct,
                    })
                    .collect();
                rows.push(DocxTableRow { cells });
            }
            _ => {}
        }
    }
}

/// Append the attachment appendix on its own page.
///
/// Attachment names render as underlined colored text; no hyperlink
/// relationship is written for them.
fn build_appendix(attachments: &[AttachedDocument], blocks: &mut Vec<DocxBlock>) {
    blocks.push(DocxBlock::PageBreak);

    blocks.push(DocxBlock::Paragraph(DocxParagraph::heading(
        HeadingLevel::H2,
        vec![DocxRun::text("Appendix: Supporting Documents")
            .with_style(InlineStyle::default().with_bold())],
        Alignment::Left,
    )));

    blocks.push(DocxBlock::Paragraph(DocxParagraph::body(
        vec![DocxRun::text(
            "The following supporting documents accompany this proposal:",
        )],
        Alignment::Left,
    )));

    for (index, attachment) in attachments.iter().enumerate() {
        let number = DocxRun::text(format!("{}. ", index + 1));
        let name = DocxRun::text(attachment.name.clone())
            .with_style(InlineStyle::default().with_underline())
            .with_color(ATTACHMENT_NAME_COLOR);
        blocks.push(DocxBlock::Paragraph(DocxParagraph::body(
            vec![number, name],
            Alignment::Left,
        )));
    }
}
