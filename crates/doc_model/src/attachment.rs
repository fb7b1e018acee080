//! Attached supporting documents (bid-proposal variant)

use serde::{Deserialize, Serialize};

/// A supporting document attached to a bid proposal.
///
/// Attachments are listed in an appendix after all sections; they are
/// referenced by name, not embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachedDocument {
    /// Display name of the attachment
    pub name: String,
    /// Storage URL the editor resolved for the file
    pub url: String,
    /// MIME type reported at upload time
    #[serde(rename = "type")]
    pub content_type: String,
    /// File size in bytes
    pub size: u64,
}

impl AttachedDocument {
    /// Create a new attachment record
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        content_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            content_type: content_type.into(),
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_serde_uses_type_field() {
        let att = AttachedDocument::new("budget.xlsx", "/files/budget.xlsx", "application/vnd.ms-excel", 1024);
        let json = serde_json::to_string(&att).unwrap();
        assert!(json.contains(r#""type":"application/vnd.ms-excel""#));

        let back: AttachedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content_type, "application/vnd.ms-excel");
        assert_eq!(back.size, 1024);
    }
}
