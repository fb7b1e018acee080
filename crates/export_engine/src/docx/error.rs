//! Error types for DOCX export

use thiserror::Error;

/// Errors that can occur while packaging a DOCX file
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error while writing the package
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing error (package verification)
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Invalid package structure
    #[error("Invalid DOCX structure: {0}")]
    InvalidStructure(String),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<quick_xml::Error> for DocxError {
    fn from(err: quick_xml::Error) -> Self {
        DocxError::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocxError::XmlParse(format!("Attribute error: {}", err))
    }
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
