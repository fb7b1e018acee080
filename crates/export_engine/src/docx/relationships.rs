//! Relationships (.rels) generation and parsing
//!
//! DOCX connects its parts together through relationship files.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::reader::XmlParser;
use crate::docx::relationship_types;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single relationship in a .rels file
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Unique ID within the rels file (e.g. "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path relative to the source part
    pub target: String,
}

/// Collection of relationships from a .rels file
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    relationships: HashMap<String, Relationship>,
    next_id: u32,
}

impl Relationships {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            relationships: HashMap::new(),
            next_id: 1,
        }
    }

    /// Parse a .rels file from its XML content
    pub fn parse(content: &str) -> DocxResult<Self> {
        let mut result = Self::new();
        let mut reader = XmlParser::from_string(content);
        let mut buf = Vec::new();
        let mut max_id = 0u32;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    if XmlParser::matches_element(name.as_ref(), "Relationship") {
                        let id = XmlParser::get_attribute(e, b"Id").ok_or_else(|| {
                            DocxError::InvalidStructure("Relationship missing Id".into())
                        })?;
                        let rel_type = XmlParser::get_attribute(e, b"Type").ok_or_else(|| {
                            DocxError::InvalidStructure("Relationship missing Type".into())
                        })?;
                        let target = XmlParser::get_attribute(e, b"Target").ok_or_else(|| {
                            DocxError::InvalidStructure("Relationship missing Target".into())
                        })?;

                        if let Some(num) =
                            id.strip_prefix("rId").and_then(|n| n.parse::<u32>().ok())
                        {
                            max_id = max_id.max(num);
                        }

                        result.relationships.insert(
                            id.clone(),
                            Relationship {
                                id,
                                rel_type,
                                target,
                            },
                        );
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::from(e)),
                _ => {}
            }
            buf.clear();
        }

        result.next_id = max_id + 1;
        Ok(result)
    }

    /// Add a relationship and return its ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;

        self.relationships.insert(
            id.clone(),
            Relationship {
                id: id.clone(),
                rel_type: rel_type.to_string(),
                target: target.to_string(),
            },
        );

        id
    }

    /// Get a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Get a relationship by type
    pub fn get_by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.relationships.values().find(|r| r.rel_type == rel_type)
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Generate XML content for the .rels file
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<Relationships xmlns="{}">"#,
            crate::docx::namespaces::PKG_REL
        ));

        for rel in self.relationships.values() {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id, rel.rel_type, rel.target
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Create the root .rels file for a new package
pub fn create_root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::DOCUMENT, "word/document.xml");
    rels
}

/// Create the document.xml.rels for a new package
pub fn create_document_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::STYLES, "styles.xml");
    rels.add(relationship_types::NUMBERING, "numbering.xml");
    rels.add(relationship_types::SETTINGS, "settings.xml");
    rels
}
