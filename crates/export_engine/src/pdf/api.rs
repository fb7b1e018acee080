//! Public API for PDF export
//!
//! The PDF path takes the rendered root HTML for the whole document; the
//! caller (the editor) owns that markup. For callers that only hold the
//! document model, [`export_document_model`] composes the export HTML
//! first.

use crate::artifact::ExportArtifact;
use crate::pdf::error::PdfResult;
use crate::pdf::options::PdfExportOptions;
use crate::pdf::pipeline::render_html_to_pdf;
use doc_model::Document;
use render_surface::compose_export_html;
use std::path::Path;

/// MIME type of the produced artifact
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Export rendered document HTML as a PDF artifact.
///
/// The `.pdf` extension is appended to the caller's filename stem. On
/// error no bytes are produced.
pub fn export_document(
    html: &str,
    filename: &str,
    options: &PdfExportOptions,
) -> PdfResult<ExportArtifact> {
    let bytes = render_html_to_pdf(html, options)?;
    Ok(ExportArtifact::new(
        format!("{filename}.pdf"),
        PDF_CONTENT_TYPE,
        bytes,
    ))
}

/// Export a document model as a PDF artifact.
///
/// Composes the export HTML (sections in order, page-break markers
/// between them) and defaults the PDF title to the document title.
pub fn export_document_model(
    document: &Document,
    filename: &str,
    options: &PdfExportOptions,
) -> PdfResult<ExportArtifact> {
    let mut options = options.clone();
    if options.title.is_none() {
        options.title = Some(document.title.clone());
    }
    let html = compose_export_html(document);
    export_document(&html, filename, &options)
}

/// Export rendered document HTML directly to a file on disk.
pub fn export_document_to_file(
    html: &str,
    path: &Path,
    options: &PdfExportOptions,
) -> PdfResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let bytes = render_html_to_pdf(html, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Section;

    #[test]
    fn test_artifact_filename_and_mime() {
        let artifact =
            export_document("<p>bid</p>", "bid-proposal", &PdfExportOptions::default()).unwrap();
        assert_eq!(artifact.filename, "bid-proposal.pdf");
        assert_eq!(artifact.content_type, PDF_CONTENT_TYPE);
        assert!(artifact.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_model_export_uses_document_title() {
        let mut doc = Document::new("Coastal Defence Tender");
        doc.push_section(Section::new("1", "Scope", "<p>works</p>", 1));

        let artifact =
            export_document_model(&doc, "tender", &PdfExportOptions::default()).unwrap();
        assert!(String::from_utf8_lossy(&artifact.bytes).contains("Coastal Defence Tender"));
    }

    #[test]
    fn test_export_to_file_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("out.pdf");

        export_document_to_file("<p>x</p>", &path, &PdfExportOptions::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }
}
