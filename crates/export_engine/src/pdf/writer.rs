//! Low-level PDF writer
//!
//! Handles the PDF file structure: header, indirect objects, stream
//! compression, cross-reference table, and trailer.

use crate::pdf::error::PdfResult;
use crate::pdf::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use std::io::Write;

/// An object in the PDF file with its byte offset
#[derive(Debug)]
struct ObjectEntry {
    obj_num: u32,
    gen_num: u16,
    offset: u64,
}

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    objects: Vec<ObjectEntry>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Create a new PDF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    /// Set whether to compress content streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Write bytes and update position
    fn write_bytes(&mut self, data: &[u8]) -> PdfResult<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Write a string and update position
    fn write_str(&mut self, s: &str) -> PdfResult<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the PDF header
    pub fn write_header(&mut self) -> PdfResult<()> {
        self.write_str("%PDF-1.4\n")?;
        // Binary marker so transports treat the file as binary.
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: PdfObject) -> PdfResult<()> {
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&object)?;
        let serialized = serializer.into_inner();
        self.write_bytes(&serialized)?;

        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry {
            obj_num,
            gen_num: 0,
            offset,
        });

        Ok(())
    }

    /// Write a stream object, compressing unless already compressed
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> PdfResult<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));

        self.write_object(obj_num, PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(
        &mut self,
        catalog_ref: u32,
        info_ref: Option<u32>,
    ) -> PdfResult<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let entries: Vec<_> = self
            .objects
            .iter()
            .map(|e| (e.obj_num, e.offset, e.gen_num))
            .collect();
        let next_obj_num = self.next_obj_num;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", next_obj_num))?;

        // Free entry for object 0.
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for (obj_num, offset, gen_num) in entries {
            // Fill gaps with free entries if needed.
            while expected_num < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }
            self.write_str(&format!("{:010} {:05} n \n", offset, gen_num))?;
            expected_num = obj_num + 1;
        }

        self.write_str("trailer\n")?;

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(self.next_obj_num as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref, 0));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info, 0));
        }

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        let serialized = serializer.into_inner();
        self.write_bytes(&serialized)?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> PdfResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Compress stream data with zlib and mark the filter
fn compress_stream(mut stream: PdfStream) -> PdfResult<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream
        .dict
        .insert("Filter", PdfObject::name("FlateDecode"));

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_starts_with_version() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.write_header().unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.starts_with("%PDF-1.4"));
    }

    #[test]
    fn test_object_wrapping() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);

        let obj_num = writer.allocate_object();
        writer.write_object(obj_num, PdfObject::Integer(42)).unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("1 0 obj"));
        assert!(output.contains("42"));
        assert!(output.contains("endobj"));
    }

    #[test]
    fn test_xref_and_trailer() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.write_header().unwrap();
        let catalog = writer.allocate_object();
        writer
            .write_object(catalog, PdfObject::Dictionary(PdfDictionary::new().with_type("Catalog")))
            .unwrap();
        writer.write_xref_and_trailer(catalog, None).unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("xref"));
        assert!(output.contains("trailer"));
        assert!(output.contains("startxref"));
        assert!(output.ends_with("%%EOF\n"));
        assert!(output.contains("/Root 1 0 R"));
    }

    #[test]
    fn test_stream_compression_sets_filter() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        let obj = writer.allocate_object();
        writer
            .write_stream_object(obj, PdfStream::new(vec![0u8; 1024]))
            .unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_precompressed_stream_is_not_recompressed() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        let obj = writer.allocate_object();
        let mut stream = PdfStream::new(b"already".to_vec());
        stream.compressed = true;
        writer.write_stream_object(obj, stream).unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains("/Length 7"));
        assert!(!output.contains("FlateDecode"));
    }
}
