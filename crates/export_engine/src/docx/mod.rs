//! DOCX Export Module
//!
//! Builds a Microsoft Word DOCX package from the document model. DOCX is
//! based on the Office Open XML (OOXML) format defined in ECMA-376: a ZIP
//! archive of XML parts:
//!
//! - `[Content_Types].xml` - content type definitions
//! - `_rels/.rels` - root relationships
//! - `word/document.xml` - main document content
//! - `word/styles.xml` - style definitions
//! - `word/numbering.xml` - the shared list numbering definition
//! - `word/settings.xml` - compatibility settings
//! - `word/_rels/document.xml.rels` - document relationships

mod api;
mod ast;
mod builder;
mod content_types;
mod document_writer;
mod error;
mod numbering_writer;
mod reader;
mod relationships;
mod styles_writer;
mod tables_writer;
mod writer;

pub use api::{export_document, export_document_to_file, DOCX_CONTENT_TYPE};
pub use ast::{DocxBlock, DocxParagraph, DocxRun, DocxTable, DocxTableCell, DocxTableRow, HeadingLevel};
pub use builder::build_blocks;
pub use error::{DocxError, DocxResult};

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Content types namespace
    pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const NUMBERING: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const NUMBERING: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
    pub const SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}
