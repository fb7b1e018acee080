//! Page geometry and pagination slicing
//!
//! The document bitmap is divided top-to-bottom into consecutive,
//! non-overlapping, gap-free segments; each segment becomes one page.
//! The per-page segment height comes from mapping the printable page
//! area back into bitmap pixel units.

use crate::pdf::error::{PdfError, PdfResult};

/// A4 page size in points
pub const A4_WIDTH_PT: f32 = 595.276;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Default page margin in points (10 mm)
pub const DEFAULT_MARGIN_PT: f32 = 28.35;

/// Geometry mapping between bitmap pixels and PDF page points
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Uniform margin in points
    pub margin: f32,
    /// Printable width in points
    pub content_width: f32,
    /// Points per bitmap pixel
    pub scale: f32,
    /// Content height of one page, in bitmap pixel rows
    pub rows_per_page: u32,
}

impl PageGeometry {
    /// Compute the geometry for a bitmap of the given width.
    pub fn for_bitmap(bitmap_width: u32, margin: f32) -> PdfResult<Self> {
        if bitmap_width == 0 {
            return Err(PdfError::InvalidDocument(
                "bitmap has zero width".to_string(),
            ));
        }
        if !(0.0..A4_WIDTH_PT / 2.0).contains(&margin) {
            return Err(PdfError::InvalidDocument(format!(
                "margin {margin} does not fit the page"
            )));
        }

        let content_width = A4_WIDTH_PT - 2.0 * margin;
        let scale = content_width / bitmap_width as f32;
        let content_height_pt = A4_HEIGHT_PT - 2.0 * margin;
        let rows_per_page = ((content_height_pt / scale).floor() as u32).max(1);

        Ok(Self {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            margin,
            content_width,
            scale,
            rows_per_page,
        })
    }

    /// Slice a bitmap of `bitmap_height` rows into page segments.
    pub fn slice_heights(&self, bitmap_height: u32) -> Vec<u32> {
        slice_heights(bitmap_height, self.rows_per_page)
    }

    /// Height of a segment in points
    pub fn segment_height_pt(&self, rows: u32) -> f32 {
        rows as f32 * self.scale
    }
}

/// Divide `total` rows into consecutive segments of at most `per_page`
/// rows. The final segment may be shorter; an exact multiple produces no
/// trailing empty segment.
pub fn slice_heights(total: u32, per_page: u32) -> Vec<u32> {
    if total == 0 || per_page == 0 {
        return Vec::new();
    }
    let mut slices = Vec::with_capacity(total.div_ceil(per_page) as usize);
    let mut remaining = total;
    while remaining > 0 {
        let height = remaining.min(per_page);
        slices.push(height);
        remaining -= height;
    }
    slices
}
