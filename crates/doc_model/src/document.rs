//! Document and section types

use serde::{Deserialize, Serialize};

/// One titled, ordered block of HTML content within a document.
///
/// `content` holds a bounded HTML subset produced by the editor: block
/// tags `h1`-`h4`, `p`, `ul`, `ol`, `li`, `table`/`thead`/`tbody`/`tr`/
/// `td`/`th`, `br`; inline tags `strong`/`b`, `em`/`i`, `u`; and an
/// optional inline `style="text-align: ..."` on block tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Opaque identifier assigned by the editor
    pub id: String,
    /// Section title shown in the editor's outline
    pub title: String,
    /// HTML fragment for the section body
    pub content: String,
    /// Sort key; sections render in ascending order
    pub order: i32,
}

impl Section {
    /// Create a new section
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            order,
        }
    }
}

/// A complete document: a title plus its ordered sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document title (also used for output metadata)
    pub title: String,
    /// Sections in editor insertion order; render order is `Section::order`
    pub sections: Vec<Section>,
}

impl Document {
    /// Create an empty document with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Add a section
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Sections sorted by ascending `order`.
    ///
    /// Equal `order` values keep their insertion position (stable sort),
    /// so the editor's submission order is the tie-break.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }
}
