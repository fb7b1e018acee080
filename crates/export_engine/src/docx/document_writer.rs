//! Document.xml writer
//!
//! Serializes the DOCX block AST into WordprocessingML.

use crate::docx::ast::{
    DocxBlock, DocxParagraph, DocxRun, HeadingLevel, DECIMAL_NUM_ID, LIST_HANGING_TWIPS,
    LIST_INDENT_TWIPS,
};
use crate::docx::error::DocxResult;
use crate::docx::namespaces;
use crate::docx::tables_writer::TableWriter;
use html_tree::Alignment;

/// A4 page size in twips
pub const PAGE_WIDTH_TWIPS: u32 = 11906;
pub const PAGE_HEIGHT_TWIPS: u32 = 16838;

/// Uniform 1-inch page margin in twips
pub const PAGE_MARGIN_TWIPS: u32 = 1440;

/// Writer for document.xml
pub struct DocumentWriter;

impl DocumentWriter {
    /// Create a new document writer
    pub fn new() -> Self {
        Self
    }

    /// Generate document.xml content
    pub fn write(&self, blocks: &[DocxBlock]) -> DocxResult<String> {
        let mut xml = String::new();

        // XML declaration
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');

        // Document element with namespaces
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        xml.push_str("<w:body>");

        for block in blocks {
            match block {
                DocxBlock::Paragraph(para) => self.write_paragraph(&mut xml, para)?,
                DocxBlock::Table(table) => TableWriter::new().write_table(&mut xml, table)?,
                DocxBlock::PageBreak => {
                    xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
                }
            }
        }

        // Single document section: A4, uniform 1-inch margins.
        xml.push_str("<w:sectPr>");
        xml.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS
        ));
        xml.push_str(&format!(
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            m = PAGE_MARGIN_TWIPS
        ));
        xml.push_str("</w:sectPr>");

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");

        Ok(xml)
    }

    /// Write a paragraph element
    fn write_paragraph(&self, xml: &mut String, para: &DocxParagraph) -> DocxResult<()> {
        xml.push_str("<w:p>");
        self.write_paragraph_properties(xml, para)?;
        for run in &para.runs {
            write_run(xml, run, false)?;
        }
        xml.push_str("</w:p>");
        Ok(())
    }

    /// Write paragraph properties
    fn write_paragraph_properties(&self, xml: &mut String, para: &DocxParagraph) -> DocxResult<()> {
        let has_numbering = para.numbered;
        let has_indent = para.numbered || para.bullet;
        let has_spacing = para.heading.is_some();
        let has_alignment = para.alignment != Alignment::Left;

        if !has_numbering && !has_indent && !has_spacing && !has_alignment {
            return Ok(());
        }

        xml.push_str("<w:pPr>");

        // All ordered lists share the one decimal numbering instance.
        if has_numbering {
            xml.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                DECIMAL_NUM_ID
            ));
        }

        if let Some(level) = para.heading {
            let (before, after) = level.spacing_twips();
            xml.push_str(&format!(
                r#"<w:spacing w:before="{}" w:after="{}"/>"#,
                before, after
            ));
        }

        if has_indent {
            xml.push_str(&format!(
                r#"<w:ind w:left="{}" w:hanging="{}"/>"#,
                LIST_INDENT_TWIPS, LIST_HANGING_TWIPS
            ));
        }

        if has_alignment {
            let val = match para.alignment {
                Alignment::Left => "left",
                Alignment::Center => "center",
                Alignment::Right => "right",
            };
            xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, val));
        }

        xml.push_str("</w:pPr>");
        Ok(())
    }
}

/// Write a run element.
///
/// `force_bold` is used by the table writer to render header cells bold.
pub(super) fn write_run(xml: &mut String, run: &DocxRun, force_bold: bool) -> DocxResult<()> {
    xml.push_str("<w:r>");
    write_run_properties(xml, run, force_bold)?;

    if run.break_before {
        xml.push_str("<w:br/>");
    }

    if run.text.is_empty() {
        xml.push_str("<w:t/>");
    } else {
        let parts: Vec<&str> = run.text.split('\n').collect();
        for (line_index, part) in parts.iter().enumerate() {
            let segments: Vec<&str> = part.split('\t').collect();
            for (i, segment) in segments.iter().enumerate() {
                if !segment.is_empty() {
                    // Preserve leading/trailing spaces explicitly.
                    let needs_preserve =
                        segment.starts_with(' ') || segment.ends_with(' ');
                    if needs_preserve {
                        xml.push_str(r#"<w:t xml:space="preserve">"#);
                    } else {
                        xml.push_str("<w:t>");
                    }
                    xml.push_str(&escape_xml(segment));
                    xml.push_str("</w:t>");
                }
                if i < segments.len() - 1 {
                    xml.push_str("<w:tab/>");
                }
            }
            if line_index < parts.len() - 1 {
                xml.push_str("<w:br/>");
            }
        }
    }

    xml.push_str("</w:r>");
    Ok(())
}

/// Write run properties
fn write_run_properties(xml: &mut String, run: &DocxRun, force_bold: bool) -> DocxResult<()> {
    let bold = run.style.bold || force_bold;
    let has_props =
        bold || run.style.italic || run.style.underline || run.size.is_some() || run.color.is_some();
    if !has_props {
        return Ok(());
    }

    xml.push_str("<w:rPr>");

    if bold {
        xml.push_str("<w:b/>");
    }
    if run.style.italic {
        xml.push_str("<w:i/>");
    }
    if let Some(ref color) = run.color {
        let color_val = color.trim_start_matches('#');
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, color_val));
    }
    if let Some(size) = run.size {
        let half_pts = (size * 2.0) as u32;
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, half_pts));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, half_pts));
    }
    if run.style.underline {
        xml.push_str(r#"<w:u w:val="single"/>"#);
    }

    xml.push_str("</w:rPr>");
    Ok(())
}

/// Escape special XML characters
pub(super) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_tree::InlineStyle;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_empty_document_still_has_body_and_section() {
        let xml = DocumentWriter::new().write(&[]).unwrap();
        assert!(xml.contains("<w:body>"));
        assert!(xml.contains("<w:sectPr>"));
        assert!(xml.contains(r#"w:top="1440""#));
        assert!(xml.contains(r#"w:w="11906""#));
    }

    #[test]
    fn test_page_break_block_emits_explicit_break() {
        let xml = DocumentWriter::new().write(&[DocxBlock::PageBreak]).unwrap();
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
    }

    #[test]
    fn test_heading_paragraph_carries_size_and_spacing() {
        let para = DocxParagraph::heading(
            HeadingLevel::H1,
            vec![DocxRun {
                text: "Title".to_string(),
                style: InlineStyle::default().with_bold(),
                size: Some(HeadingLevel::H1.size_points()),
                break_before: false,
                color: None,
            }],
            Alignment::Left,
        );
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains(r#"<w:sz w:val="36"/>"#));
        assert!(xml.contains(r#"<w:spacing w:before="240" w:after="120"/>"#));
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn test_centered_paragraph_emits_jc() {
        let para = DocxParagraph::body(vec![DocxRun::text("x")], Alignment::Center);
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
    }

    #[test]
    fn test_left_paragraph_omits_paragraph_properties() {
        let para = DocxParagraph::body(vec![DocxRun::text("x")], Alignment::Left);
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(!xml.contains("<w:pPr>"));
    }

    #[test]
    fn test_numbered_item_references_shared_instance() {
        let para = DocxParagraph::numbered_item(vec![DocxRun::text("first")]);
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="720" w:hanging="360"/>"#));
    }

    #[test]
    fn test_empty_run_emits_empty_text_element() {
        let para = DocxParagraph::empty();
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains("<w:t/>"));
    }

    #[test]
    fn test_run_with_spaces_preserves_them() {
        let para = DocxParagraph::body(vec![DocxRun::text(" padded ")], Alignment::Left);
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains(r#"<w:t xml:space="preserve"> padded </w:t>"#));
    }

    #[test]
    fn test_break_before_run_emits_br() {
        let mut run = DocxRun::text("after");
        run.break_before = true;
        let para = DocxParagraph::body(vec![DocxRun::text("before"), run], Alignment::Left);
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains("<w:br/>"));
    }

    #[test]
    fn test_colored_underlined_run() {
        let run = DocxRun::text("terms.docx")
            .with_style(InlineStyle::default().with_underline())
            .with_color("2E74B5");
        let para = DocxParagraph::body(vec![run], Alignment::Left);
        let xml = DocumentWriter::new()
            .write(&[DocxBlock::Paragraph(para)])
            .unwrap();
        assert!(xml.contains(r#"<w:color w:val="2E74B5"/>"#));
        assert!(xml.contains(r#"<w:u w:val="single"/>"#));
        // Styled text only: no hyperlink element is written.
        assert!(!xml.contains("<w:hyperlink"));
    }
}
