//! Public API for DOCX export
//!
//! Entry points for turning a document model into a DOCX artifact.

use crate::artifact::ExportArtifact;
use crate::docx::builder::build_blocks;
use crate::docx::error::DocxResult;
use crate::docx::writer::DocxWriter;
use doc_model::{AttachedDocument, Document};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// MIME type of the produced artifact
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Export a document (plus optional attachments) as a DOCX artifact.
///
/// The `.docx` extension is appended to the caller's filename stem. The
/// returned artifact is always a complete package; on error no bytes are
/// produced.
pub fn export_document(
    document: &Document,
    attachments: &[AttachedDocument],
    filename: &str,
) -> DocxResult<ExportArtifact> {
    let blocks = build_blocks(document, attachments);

    let writer = DocxWriter::new(Cursor::new(Vec::new()));
    let cursor = writer.write(&blocks)?;

    Ok(ExportArtifact::new(
        format!("{filename}.docx"),
        DOCX_CONTENT_TYPE,
        cursor.into_inner(),
    ))
}

/// Export a document directly to a file on disk.
pub fn export_document_to_file(
    document: &Document,
    attachments: &[AttachedDocument],
    path: &Path,
) -> DocxResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let writer = DocxWriter::new(BufWriter::new(file));
    let blocks = build_blocks(document, attachments);
    writer.write(&blocks)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Section;
    use std::io::Read;

    fn doc_with(contents: &[&str]) -> Document {
        let mut doc = Document::new("Tender Response");
        for (i, content) in contents.iter().enumerate() {
            doc.push_section(Section::new(
                format!("s{i}"),
                format!("Section {i}"),
                *content,
                i as i32 + 1,
            ));
        }
        doc
    }

    fn read_part(artifact: &ExportArtifact, part: &str) -> String {
        let cursor = Cursor::new(artifact.bytes.clone());
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        let mut file = archive.by_name(part).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_artifact_filename_and_mime() {
        let doc = doc_with(&["<p>x</p>"]);
        let artifact = export_document(&doc, &[], "tender-response").unwrap();
        assert_eq!(artifact.filename, "tender-response.docx");
        assert_eq!(artifact.content_type, DOCX_CONTENT_TYPE);
        assert!(!artifact.is_empty());
        // ZIP local file header magic.
        assert_eq!(&artifact.bytes[0..2], b"PK");
    }

    #[test]
    fn test_three_sections_emit_two_page_breaks_in_order() {
        let doc = doc_with(&["<p>AAA</p>", "<p>BBB</p>", "<p>CCC</p>"]);
        let artifact = export_document(&doc, &[], "out").unwrap();
        let document_xml = read_part(&artifact, "word/document.xml");

        assert_eq!(document_xml.matches(r#"<w:br w:type="page"/>"#).count(), 2);

        let a = document_xml.find("AAA").unwrap();
        let first_break = document_xml.find(r#"<w:br w:type="page"/>"#).unwrap();
        let b = document_xml.find("BBB").unwrap();
        let last_break = document_xml.rfind(r#"<w:br w:type="page"/>"#).unwrap();
        let c = document_xml.find("CCC").unwrap();
        assert!(a < first_break && first_break < b);
        assert!(b < last_break && last_break < c);
    }

    #[test]
    fn test_heading_sizes_strictly_decrease_in_output() {
        let doc = doc_with(&["<h1>a</h1><h2>b</h2><h3>c</h3><h4>d</h4>"]);
        let artifact = export_document(&doc, &[], "out").unwrap();
        let document_xml = read_part(&artifact, "word/document.xml");

        let mut sizes = Vec::new();
        for chunk in document_xml.split(r#"<w:sz w:val=""#).skip(1) {
            let size: u32 = chunk.split('"').next().unwrap().parse().unwrap();
            sizes.push(size);
        }
        // Each heading writes sz once (szCs is a separate tag).
        assert_eq!(sizes, vec![36, 32, 28, 26]);
    }

    #[test]
    fn test_table_scenario_two_rows_three_cells() {
        let doc = doc_with(&[
            "<table><tr><th>A</th><th>B</th><th>C</th></tr><tr><td>1</td><td>2</td><td>3</td></tr></table>",
        ]);
        let artifact = export_document(&doc, &[], "out").unwrap();
        let document_xml = read_part(&artifact, "word/document.xml");

        assert_eq!(document_xml.matches("<w:tr>").count(), 2);
        assert_eq!(document_xml.matches("<w:tc>").count(), 6);
        assert_eq!(
            document_xml
                .matches(r#"<w:tcW w:w="1667" w:type="pct"/>"#)
                .count(),
            6
        );
        // Header cells bold: three bold runs from the th row.
        assert_eq!(document_xml.matches("<w:b/>").count(), 3);
    }

    #[test]
    fn test_numbering_part_has_single_decimal_definition() {
        let doc = doc_with(&["<ol><li>one</li></ol>"]);
        let artifact = export_document(&doc, &[], "out").unwrap();
        let numbering_xml = read_part(&artifact, "word/numbering.xml");

        assert_eq!(numbering_xml.matches("<w:abstractNum ").count(), 1);
        assert!(numbering_xml.contains(r#"<w:numFmt w:val="decimal"/>"#));
    }

    #[test]
    fn test_margins_are_one_inch() {
        let doc = doc_with(&["<p>x</p>"]);
        let artifact = export_document(&doc, &[], "out").unwrap();
        let document_xml = read_part(&artifact, "word/document.xml");
        assert!(document_xml.contains(
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#
        ));
    }

    #[test]
    fn test_appendix_only_with_attachments() {
        let doc = doc_with(&["<p>x</p>"]);

        let without = export_document(&doc, &[], "out").unwrap();
        assert!(!read_part(&without, "word/document.xml").contains("Appendix"));

        let attachments = vec![AttachedDocument::new(
            "budget.xlsx",
            "/files/budget.xlsx",
            "application/vnd.ms-excel",
            2048,
        )];
        let with = export_document(&doc, &attachments, "out").unwrap();
        let document_xml = read_part(&with, "word/document.xml");
        assert!(document_xml.contains("Appendix: Supporting Documents"));
        assert!(document_xml.contains("1. "));
        assert!(document_xml.contains("budget.xlsx"));
        // One page break separates the single section from the appendix.
        assert_eq!(document_xml.matches(r#"<w:br w:type="page"/>"#).count(), 1);
    }

    #[test]
    fn test_empty_section_produces_valid_package() {
        let doc = doc_with(&[""]);
        let artifact = export_document(&doc, &[], "out").unwrap();
        let document_xml = read_part(&artifact, "word/document.xml");
        assert!(document_xml.contains("<w:p>"));
        assert!(document_xml.contains("<w:t/>"));
    }

    #[test]
    fn test_export_to_file_writes_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.docx");
        let doc = doc_with(&["<p>x</p>"]);

        export_document_to_file(&doc, &[], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_sections_render_in_order_key_order() {
        let mut doc = Document::new("Tender");
        doc.push_section(Section::new("late", "Late", "<p>LATE</p>", 5));
        doc.push_section(Section::new("early", "Early", "<p>EARLY</p>", 1));
        let artifact = export_document(&doc, &[], "out").unwrap();
        let document_xml = read_part(&artifact, "word/document.xml");
        assert!(document_xml.find("EARLY").unwrap() < document_xml.find("LATE").unwrap());
    }
}
