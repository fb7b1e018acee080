//! Error types for rasterization

use thiserror::Error;

/// Errors that can occur while rendering HTML to a bitmap
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixel buffer for the surface could not be allocated
    #[error("could not allocate a {width}x{height} rendering surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// The requested surface dimensions are unusable
    #[error("invalid surface dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type for rasterization operations
pub type Result<T> = std::result::Result<T, RenderError>;
