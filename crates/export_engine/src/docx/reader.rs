//! XML reading helpers
//!
//! Thin wrapper over quick-xml used to parse package parts back (the
//! round-read verification the tests rely on).

use quick_xml::events::BytesStart;
use quick_xml::Reader;

/// Helper for parsing DOCX XML parts
pub struct XmlParser;

impl XmlParser {
    /// Create a reader over a string
    pub fn from_string(content: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);
        reader
    }

    /// Match an element name, ignoring any namespace prefix
    pub fn matches_element(name: &[u8], expected: &str) -> bool {
        let local = name
            .rsplit(|&b| b == b':')
            .next()
            .unwrap_or(name);
        local == expected.as_bytes()
    }

    /// Get an attribute value from a start tag
    pub fn get_attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
        element
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == name)
            .and_then(|attr| attr.unescape_value().ok())
            .map(|value| value.into_owned())
    }
}
