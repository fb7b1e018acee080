//! Error types for PDF export

use render_surface::RenderError;
use thiserror::Error;

/// Errors that can occur during PDF export
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rasterization failed; no file is produced
    #[error("rendering error: {0}")]
    Render(#[from] RenderError),

    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type for PDF operations
pub type PdfResult<T> = std::result::Result<T, PdfError>;
