//! Page image XObjects
//!
//! Each page of the output PDF is one slice of the document bitmap,
//! embedded as a raw-RGB image XObject compressed with FlateDecode.

use crate::pdf::error::{PdfError, PdfResult};
use crate::pdf::objects::{PdfDictionary, PdfObject, PdfStream};
use render_surface::Bitmap;
use std::io::Write;

/// One sliced page image ready for embedding
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Width in bitmap pixels
    pub width: u32,
    /// Height in bitmap pixels
    pub height: u32,
    /// Zlib-compressed RGB rows
    data: Vec<u8>,
}

impl PageImage {
    /// Extract a horizontal slice `[y0, y0 + rows)` from a bitmap.
    ///
    /// The bitmap's RGBA rows are converted to RGB (the surface paints
    /// fully opaque) and compressed.
    pub fn from_bitmap_rows(bitmap: &Bitmap, y0: u32, rows: u32) -> PdfResult<Self> {
        if y0 + rows > bitmap.height {
            return Err(PdfError::InvalidDocument(format!(
                "slice [{}, {}) exceeds bitmap height {}",
                y0,
                y0 + rows,
                bitmap.height
            )));
        }
        if bitmap.width == 0 || rows == 0 {
            return Err(PdfError::InvalidDocument(
                "empty bitmap slice".to_string(),
            ));
        }

        let row_stride = bitmap.width as usize * 4;
        let start = y0 as usize * row_stride;
        let end = (y0 + rows) as usize * row_stride;
        let rgba = &bitmap.pixels[start..end];

        let mut rgb = Vec::with_capacity(bitmap.width as usize * rows as usize * 3);
        for px in rgba.chunks_exact(4) {
            rgb.extend_from_slice(&px[0..3]);
        }

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&rgb)?;
        let data = encoder.finish()?;

        Ok(Self {
            width: bitmap.width,
            height: rows,
            data,
        })
    }

    /// Convert to a PDF image XObject stream
    pub fn to_xobject(&self) -> PdfStream {
        let mut dict = PdfDictionary::new().with_type("XObject");
        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", PdfObject::Integer(self.width as i64));
        dict.insert("Height", PdfObject::Integer(self.height as i64));
        dict.insert("BitsPerComponent", PdfObject::Integer(8));
        dict.insert("ColorSpace", PdfObject::name("DeviceRGB"));
        dict.insert("Filter", PdfObject::name("FlateDecode"));
        dict.insert("Length", PdfObject::Integer(self.data.len() as i64));

        PdfStream {
            dict,
            data: self.data.clone(),
            compressed: true,
        }
    }
}
