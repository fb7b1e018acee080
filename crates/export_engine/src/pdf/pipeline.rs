//! The raster-to-PDF pipeline
//!
//! Renders the export HTML into one tall bitmap, slices it into
//! page-height segments, and assembles the output file. Every transient
//! resource (surface, bitmap, slice buffers) is owned by this call and
//! dropped on all exit paths.

use crate::pdf::document::{create_catalog, create_pages, DocumentInfo};
use crate::pdf::error::{PdfError, PdfResult};
use crate::pdf::geometry::PageGeometry;
use crate::pdf::images::PageImage;
use crate::pdf::objects::{PdfDictionary, PdfObject, PdfStream};
use crate::pdf::options::PdfExportOptions;
use crate::pdf::writer::PdfWriter;
use render_surface::{RasterSurface, SurfaceOptions};

/// Render an HTML fragment to finished PDF bytes.
pub fn render_html_to_pdf(html: &str, options: &PdfExportOptions) -> PdfResult<Vec<u8>> {
    let surface = RasterSurface::new(SurfaceOptions {
        supersample: options.supersample,
        ..SurfaceOptions::default()
    })?;
    render_with_surface(&surface, html, options)
}

/// Render using a caller-provided surface.
pub fn render_with_surface(
    surface: &RasterSurface,
    html: &str,
    options: &PdfExportOptions,
) -> PdfResult<Vec<u8>> {
    let bitmap = surface.render_fragment(html)?;

    let geometry = PageGeometry::for_bitmap(bitmap.width, options.margin_pt)?;
    let slices = geometry.slice_heights(bitmap.height);
    if slices.is_empty() {
        return Err(PdfError::InvalidDocument("no pages to export".to_string()));
    }

    let mut pdf = PdfWriter::new(Vec::new());
    pdf.set_compression(options.compress);
    pdf.write_header()?;

    // Allocate object numbers up front.
    let catalog_ref = pdf.allocate_object();
    let pages_ref = pdf.allocate_object();
    let info_ref = pdf.allocate_object();

    let mut page_refs = Vec::with_capacity(slices.len());
    let mut content_refs = Vec::with_capacity(slices.len());
    let mut image_refs = Vec::with_capacity(slices.len());
    for _ in 0..slices.len() {
        page_refs.push(pdf.allocate_object());
        content_refs.push(pdf.allocate_object());
        image_refs.push(pdf.allocate_object());
    }

    // Catalog and page tree.
    pdf.write_object(catalog_ref, PdfObject::Dictionary(create_catalog(pages_ref)))?;
    pdf.write_object(pages_ref, PdfObject::Dictionary(create_pages(&page_refs)))?;

    // Info dictionary.
    let mut info = DocumentInfo::new();
    info.title = options.title.clone();
    info.author = options.author.clone();
    pdf.write_object(info_ref, PdfObject::Dictionary(info.to_dictionary()))?;

    // One image, content stream, and page per slice.
    let mut y = 0u32;
    for (index, &rows) in slices.iter().enumerate() {
        let image = PageImage::from_bitmap_rows(&bitmap, y, rows)?;
        y += rows;

        let image_name = format!("Im{index}");
        pdf.write_stream_object(image_refs[index], image.to_xobject())?;

        // Draw the slice as a full-width image anchored to the top
        // margin; a short final slice keeps its aspect ratio.
        let height_pt = geometry.segment_height_pt(rows);
        let x = geometry.margin;
        let top = geometry.page_height - geometry.margin - height_pt;
        let content = format!(
            "q\n{:.4} 0 0 {:.4} {:.4} {:.4} cm\n/{} Do\nQ",
            geometry.content_width, height_pt, x, top, image_name
        );
        pdf.write_stream_object(content_refs[index], PdfStream::new(content.into_bytes()))?;

        // Page dictionary.
        let mut page = PdfDictionary::new().with_type("Page");
        page.insert("Parent", PdfObject::Reference(pages_ref, 0));
        page.insert(
            "MediaBox",
            PdfObject::Array(vec![
                PdfObject::Real(0.0),
                PdfObject::Real(0.0),
                points(geometry.page_width),
                points(geometry.page_height),
            ]),
        );
        page.insert("Contents", PdfObject::Reference(content_refs[index], 0));

        let mut xobjects = PdfDictionary::new();
        xobjects.insert(image_name, PdfObject::Reference(image_refs[index], 0));
        let mut resources = PdfDictionary::new();
        resources.insert("XObject", PdfObject::Dictionary(xobjects));
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
        );
        page.insert("Resources", PdfObject::Dictionary(resources));

        pdf.write_object(page_refs[index], PdfObject::Dictionary(page))?;
    }

    pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
    pdf.finish()
}

/// A point value rounded to keep f32-to-f64 noise out of the output
fn points(value: f32) -> PdfObject {
    PdfObject::Real((f64::from(value) * 1000.0).round() / 1000.0)
}
