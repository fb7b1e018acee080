//! PDF document structure
//!
//! Catalog, page tree, and info dictionary helpers.

use crate::pdf::objects::{PdfDictionary, PdfObject};

/// Create the document catalog (root object)
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut catalog = PdfDictionary::new().with_type("Catalog");
    catalog.insert("Pages", PdfObject::Reference(pages_ref, 0));
    catalog
}

/// Create the page tree node referencing all pages
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut pages = PdfDictionary::new().with_type("Pages");
    pages.insert(
        "Kids",
        PdfObject::Array(
            page_refs
                .iter()
                .map(|&r| PdfObject::Reference(r, 0))
                .collect(),
        ),
    );
    pages.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    pages
}

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// PDF producer
    pub producer: Option<String>,
    /// Creation date (PDF date string format)
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    /// Create document info with the exporter's identity
    pub fn new() -> Self {
        Self {
            creator: Some("Tenderdoc".to_string()),
            producer: Some("Tenderdoc PDF Export".to_string()),
            creation_date: Some(pdf_date_now()),
            ..Default::default()
        }
    }

    /// Convert to a PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();

        if let Some(ref title) = self.title {
            dict.insert("Title", PdfObject::string(title));
        }
        if let Some(ref author) = self.author {
            dict.insert("Author", PdfObject::string(author));
        }
        if let Some(ref creator) = self.creator {
            dict.insert("Creator", PdfObject::string(creator));
        }
        if let Some(ref producer) = self.producer {
            dict.insert("Producer", PdfObject::string(producer));
        }
        if let Some(ref date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::string(date));
        }

        dict
    }
}

/// Current time in PDF date string format
fn pdf_date_now() -> String {
    chrono::Utc::now().format("D:%Y%m%d%H%M%S+00'00'").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_references_pages() {
        let catalog = create_catalog(2);
        assert!(matches!(
            catalog.get("Pages"),
            Some(PdfObject::Reference(2, 0))
        ));
    }

    #[test]
    fn test_pages_count_matches_kids() {
        let pages = create_pages(&[3, 5, 7]);
        assert!(matches!(pages.get("Count"), Some(PdfObject::Integer(3))));
        match pages.get("Kids") {
            Some(PdfObject::Array(kids)) => assert_eq!(kids.len(), 3),
            other => panic!("unexpected Kids entry: {other:?}"),
        }
    }

    #[test]
    fn test_info_dictionary_carries_title() {
        let mut info = DocumentInfo::new();
        info.title = Some("Bid Proposal".to_string());
        let dict = info.to_dictionary();
        assert!(dict.get("Title").is_some());
        assert!(dict.get("Producer").is_some());
        assert!(dict.get("CreationDate").is_some());
    }

    #[test]
    fn test_pdf_date_format() {
        let date = pdf_date_now();
        assert!(date.starts_with("D:"));
        assert!(date.ends_with("+00'00'"));
    }
}
