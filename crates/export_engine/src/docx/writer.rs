//! DOCX Writer Infrastructure
//!
//! Creates ZIP archives with correct DOCX structure.

use crate::docx::ast::DocxBlock;
use crate::docx::content_types::{create_default_content_types, ContentTypes};
use crate::docx::document_writer::DocumentWriter;
use crate::docx::error::DocxResult;
use crate::docx::numbering_writer::NumberingWriter;
use crate::docx::relationships::{create_document_rels, create_root_rels, Relationships};
use crate::docx::styles_writer::StylesWriter;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write a complete DOCX file from the block AST.
    ///
    /// Packaging is total: either every part lands in the archive and the
    /// inner writer is returned, or the call fails and no file exists.
    pub fn write(mut self, blocks: &[DocxBlock]) -> DocxResult<W> {
        // Write document.xml
        let doc_xml = DocumentWriter::new().write(blocks)?;
        self.write_file("word/document.xml", &doc_xml)?;

        // Write styles.xml
        let styles_xml = StylesWriter::new().write()?;
        self.write_file("word/styles.xml", &styles_xml)?;

        // Write numbering.xml (the shared decimal definition)
        let numbering_xml = NumberingWriter::new().write()?;
        self.write_file("word/numbering.xml", &numbering_xml)?;

        // Write settings.xml
        self.write_file("word/settings.xml", &generate_settings_xml())?;

        // Write relationships
        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;

        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        // Write [Content_Types].xml last
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        // Finish the ZIP archive
        let writer = self.zip.finish()?;
        Ok(writer)
    }

    /// Write a file to the ZIP archive
    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }
}

/// Generate a minimal settings.xml
fn generate_settings_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:compat>
        <w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>
    </w:compat>
</w:settings>"#
        .to_string()
}
