//! Numbering.xml writer
//!
//! The package carries exactly one numbering definition: a single-level
//! decimal list. Every ordered list in the document references the same
//! instance; unordered lists render literal bullet markers instead and
//! never touch numbering.

use crate::docx::ast::DECIMAL_NUM_ID;
use crate::docx::error::DocxResult;
use crate::docx::namespaces;

/// Abstract numbering ID backing the shared instance
const DECIMAL_ABSTRACT_ID: u32 = 0;

/// Writer for numbering.xml
pub struct NumberingWriter;

impl NumberingWriter {
    /// Create a new numbering writer
    pub fn new() -> Self {
        Self
    }

    /// Generate numbering.xml content
    pub fn write(&self) -> DocxResult<String> {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:numbering xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        // The one abstract definition: decimal, single level.
        xml.push_str(&format!(
            r#"<w:abstractNum w:abstractNumId="{}">"#,
            DECIMAL_ABSTRACT_ID
        ));
        xml.push_str(r#"<w:multiLevelType w:val="singleLevel"/>"#);
        xml.push_str(r#"<w:lvl w:ilvl="0">"#);
        xml.push_str(r#"<w:start w:val="1"/>"#);
        xml.push_str(r#"<w:numFmt w:val="decimal"/>"#);
        xml.push_str(r#"<w:lvlText w:val="%1."/>"#);
        xml.push_str(r#"<w:lvlJc w:val="left"/>"#);
        xml.push_str(r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>"#);
        xml.push_str("</w:lvl>");
        xml.push_str("</w:abstractNum>");

        // The shared instance all ordered lists reference.
        xml.push_str(&format!(r#"<w:num w:numId="{}">"#, DECIMAL_NUM_ID));
        xml.push_str(&format!(
            r#"<w:abstractNumId w:val="{}"/>"#,
            DECIMAL_ABSTRACT_ID
        ));
        xml.push_str("</w:num>");

        xml.push_str("</w:numbering>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_has_exactly_one_definition() {
        let xml = NumberingWriter::new().write().unwrap();
        assert_eq!(xml.matches("<w:abstractNum ").count(), 1);
        assert_eq!(xml.matches("<w:num ").count(), 1);
        assert!(xml.contains(r#"<w:numFmt w:val="decimal"/>"#));
        assert!(xml.contains(r#"<w:multiLevelType w:val="singleLevel"/>"#));
    }

    #[test]
    fn test_instance_references_abstract_definition() {
        let xml = NumberingWriter::new().write().unwrap();
        assert!(xml.contains(r#"<w:num w:numId="1">"#));
        assert!(xml.contains(r#"<w:abstractNumId w:val="0"/>"#));
    }
}
