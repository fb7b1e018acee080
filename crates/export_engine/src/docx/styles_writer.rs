//! Styles.xml writer
//!
//! The export uses direct formatting for headings, so styles.xml only
//! carries the document defaults and the Normal style.

use crate::docx::error::DocxResult;
use crate::docx::namespaces;

/// Writer for styles.xml
pub struct StylesWriter;

impl StylesWriter {
    /// Create a new styles writer
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml content
    pub fn write(&self) -> DocxResult<String> {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        // Document defaults
        xml.push_str("<w:docDefaults>");
        xml.push_str("<w:rPrDefault>");
        xml.push_str("<w:rPr>");
        xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
        xml.push_str(r#"<w:sz w:val="22"/>"#);
        xml.push_str(r#"<w:szCs w:val="22"/>"#);
        xml.push_str("</w:rPr>");
        xml.push_str("</w:rPrDefault>");
        xml.push_str("<w:pPrDefault>");
        xml.push_str("<w:pPr>");
        xml.push_str(r#"<w:spacing w:after="160" w:line="259" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr>");
        xml.push_str("</w:pPrDefault>");
        xml.push_str("</w:docDefaults>");

        // Normal style
        xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Normal" w:default="1">"#);
        xml.push_str(r#"<w:name w:val="Normal"/>"#);
        xml.push_str(r#"<w:qFormat/>"#);
        xml.push_str("</w:style>");

        xml.push_str("</w:styles>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_carry_defaults_and_normal() {
        let xml = StylesWriter::new().write().unwrap();
        assert!(xml.contains("<w:docDefaults>"));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains(r#"w:styleId="Normal""#));
    }
}
