//! The isolated raster surface

use crate::error::{RenderError, Result};
use crate::font::FontLibrary;
use crate::layout::layout_document;
use crate::paint::paint_display_list;
use crate::stylesheet;
use html_tree::parse_html_fragment;

/// Configuration for a raster surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceOptions {
    /// Layout width in CSS pixels (A4 print width by default)
    pub width_px: f32,
    /// Supersampling scale applied at paint time for print sharpness
    pub supersample: f32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            width_px: stylesheet::SURFACE_WIDTH_PX,
            supersample: 2.0,
        }
    }
}

/// A rasterized document: one tall RGBA bitmap.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel rows, top to bottom
    pub pixels: Vec<u8>,
}

/// An isolated rendering surface.
///
/// The surface owns its fonts and styling; it never consults the host
/// application. Dropping it releases everything it allocated, on success
/// and failure paths alike.
pub struct RasterSurface {
    options: SurfaceOptions,
    fonts: FontLibrary,
}

impl RasterSurface {
    /// Create a surface, discovering fonts from the system.
    pub fn new(options: SurfaceOptions) -> Result<Self> {
        Self::with_fonts(options, FontLibrary::discover())
    }

    /// Create a surface with a caller-provided font library.
    pub fn with_fonts(options: SurfaceOptions, fonts: FontLibrary) -> Result<Self> {
        if !options.width_px.is_finite() || options.width_px < 64.0 {
            return Err(RenderError::InvalidDimensions(format!(
                "surface width {} is too small",
                options.width_px
            )));
        }
        if !options.supersample.is_finite() || options.supersample <= 0.0 {
            return Err(RenderError::InvalidDimensions(format!(
                "supersample scale {} is not positive",
                options.supersample
            )));
        }
        Ok(Self { options, fonts })
    }

    /// The surface configuration
    pub fn options(&self) -> SurfaceOptions {
        self.options
    }

    /// Render an HTML fragment into a single tall bitmap.
    ///
    /// Layout completes before this returns; there is no settle delay to
    /// wait out. An empty fragment still produces a bitmap at least one
    /// body line tall, so a blank document exports one blank page.
    pub fn render_fragment(&self, html: &str) -> Result<Bitmap> {
        let nodes = parse_html_fragment(html);
        let display = layout_document(&self.fonts, &nodes, self.options.width_px);
        let pixmap = paint_display_list(&display, self.options.supersample, &self.fonts)?;

        Ok(Bitmap {
            width: pixmap.width(),
            height: pixmap.height(),
            pixels: pixmap.take(),
        })
    }
}
