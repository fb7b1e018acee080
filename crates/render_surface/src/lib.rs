//! Render Surface - hermetic HTML rasterization for the PDF pipeline
//!
//! The PDF exporter does not draw text onto pages directly; it rasterizes
//! the whole document into one tall bitmap and slices that into pages.
//! This crate is the rendering side of that contract: an isolated surface
//! with a fixed print width and a fixed, self-contained base stylesheet.
//! Nothing here consults ambient application styling - every color and
//! metric the rasterizer sees is defined in [`stylesheet`], so host-side
//! style syntax can never break an export.
//!
//! Layout here is synchronous: when [`RasterSurface::render_fragment`]
//! returns, layout and paint are complete. There is no settle delay.

mod compose;
mod error;
mod font;
mod layout;
mod paint;
pub mod stylesheet;
mod surface;

pub use compose::*;
pub use error::*;
pub use font::*;
pub use layout::*;
pub use surface::*;
