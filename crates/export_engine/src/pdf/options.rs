//! PDF export options

use crate::pdf::geometry::DEFAULT_MARGIN_PT;
use serde::{Deserialize, Serialize};

/// Options for PDF export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Document title for the info dictionary
    #[serde(default)]
    pub title: Option<String>,
    /// Document author
    #[serde(default)]
    pub author: Option<String>,
    /// Uniform page margin in points
    #[serde(default = "default_margin")]
    pub margin_pt: f32,
    /// Supersampling scale used by the render surface
    #[serde(default = "default_supersample")]
    pub supersample: f32,
    /// Whether to compress content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_margin() -> f32 {
    DEFAULT_MARGIN_PT
}

fn default_supersample() -> f32 {
    2.0
}

fn default_compress() -> bool {
    true
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            margin_pt: default_margin(),
            supersample: default_supersample(),
            compress: default_compress(),
        }
    }
}

impl PdfExportOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the page margin in points
    pub fn with_margin(mut self, margin_pt: f32) -> Self {
        self.margin_pt = margin_pt;
        self
    }

    /// Enable or disable content stream compression
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PdfExportOptions::default();
        assert_eq!(options.margin_pt, DEFAULT_MARGIN_PT);
        assert_eq!(options.supersample, 2.0);
        assert!(options.compress);
        assert!(options.title.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let options = PdfExportOptions::new()
            .with_title("Bid")
            .with_author("Acme")
            .with_margin(36.0)
            .with_compression(false);
        assert_eq!(options.title.as_deref(), Some("Bid"));
        assert_eq!(options.author.as_deref(), Some("Acme"));
        assert_eq!(options.margin_pt, 36.0);
        assert!(!options.compress);
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let options: PdfExportOptions = serde_json::from_str(r#"{"title":"Bid"}"#).unwrap();
        assert_eq!(options.title.as_deref(), Some("Bid"));
        assert_eq!(options.margin_pt, DEFAULT_MARGIN_PT);
        assert!(options.compress);
    }
}
