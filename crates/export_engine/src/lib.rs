//! Export Engine - DOCX and rasterized PDF export
//!
//! This crate turns a [`doc_model::Document`] into exactly one of two
//! downloadable artifacts:
//!
//! - a WordprocessingML (DOCX) package built from the sections' HTML via
//!   a block-level AST, or
//! - a paginated PDF assembled from vertical slices of one tall document
//!   bitmap rendered by `render_surface`.
//!
//! The two pipelines share no runtime state; each invocation owns its
//! transient buffers and either returns one complete, valid file or an
//! error - never a partial file.

mod artifact;
pub mod docx;
pub mod pdf;

pub use artifact::*;

// Re-export the per-format entry points and error types
pub use docx::{DocxError, DocxResult};
pub use pdf::{PdfError, PdfResult};
