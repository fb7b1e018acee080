//! [Content_Types].xml generation and parsing
//!
//! Declares the content type for every part in the DOCX package.

use crate::docx::content_type_values;
use crate::docx::error::{DocxError, DocxResult};
use crate::docx::reader::XmlParser;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Content types in a DOCX package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension (e.g. "xml" -> "application/xml")
    pub defaults: HashMap<String, String>,
    /// Override content types by part name
    pub overrides: HashMap<String, String>,
}

impl ContentTypes {
    /// Create an empty set with the standard defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.defaults.insert(
            "rels".to_string(),
            content_type_values::RELATIONSHIPS.to_string(),
        );
        ct.defaults
            .insert("xml".to_string(), "application/xml".to_string());
        ct
    }

    /// Parse [Content_Types].xml
    pub fn parse(content: &str) -> DocxResult<Self> {
        let mut result = Self::default();
        let mut reader = XmlParser::from_string(content);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    if XmlParser::matches_element(name.as_ref(), "Default") {
                        if let (Some(ext), Some(ct)) = (
                            XmlParser::get_attribute(e, b"Extension"),
                            XmlParser::get_attribute(e, b"ContentType"),
                        ) {
                            result.defaults.insert(ext, ct);
                        }
                    } else if XmlParser::matches_element(name.as_ref(), "Override") {
                        if let (Some(part), Some(ct)) = (
                            XmlParser::get_attribute(e, b"PartName"),
                            XmlParser::get_attribute(e, b"ContentType"),
                        ) {
                            result.overrides.insert(part, ct);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::from(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(result)
    }

    /// Register an override for a specific part
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{}", part_name)
        };
        self.overrides.insert(normalized, content_type.to_string());
    }

    /// Look up the content type for a part path
    pub fn get_content_type(&self, path: &str) -> Option<&String> {
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if let Some(ct) = self.overrides.get(&normalized) {
            return Some(ct);
        }
        path.rsplit('.').next().and_then(|ext| self.defaults.get(ext))
    }

    /// Generate [Content_Types].xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<Types xmlns="{}">"#,
            crate::docx::namespaces::CT
        ));

        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                ext, ct
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, ct
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

/// Content types for a freshly created export package
pub fn create_default_content_types() -> ContentTypes {
    let mut ct = ContentTypes::new();
    ct.add_override("word/document.xml", content_type_values::DOCUMENT);
    ct.add_override("word/styles.xml", content_type_values::STYLES);
    ct.add_override("word/numbering.xml", content_type_values::NUMBERING);
    ct.add_override("word/settings.xml", content_type_values::SETTINGS);
    ct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package_covers_all_parts() {
        let ct = create_default_content_types();
        assert_eq!(
            ct.get_content_type("word/document.xml").unwrap(),
            content_type_values::DOCUMENT
        );
        assert_eq!(
            ct.get_content_type("word/numbering.xml").unwrap(),
            content_type_values::NUMBERING
        );
        assert_eq!(
            ct.get_content_type("_rels/.rels").unwrap(),
            content_type_values::RELATIONSHIPS
        );
    }

    #[test]
    fn test_to_xml_round_trips() {
        let original = create_default_content_types();
        let xml = original.to_xml();
        let parsed = ContentTypes::parse(&xml).unwrap();

        assert_eq!(parsed.overrides.len(), original.overrides.len());
        assert_eq!(
            parsed.get_content_type("word/styles.xml").unwrap(),
            content_type_values::STYLES
        );
    }
}
