//! DOCX block AST
//!
//! The intermediate tree the builder produces from section HTML and the
//! XML writers serialize into `word/document.xml`.

use html_tree::{Alignment, InlineStyle, StyledRun};

/// Body font size in half-points (matches the document defaults)
pub const BODY_SIZE_HALF_POINTS: u32 = 22;

/// The shared decimal numbering instance referenced by all ordered lists
pub const DECIMAL_NUM_ID: u32 = 1;

/// Left indent for list items, in twips
pub const LIST_INDENT_TWIPS: u32 = 720;

/// Hanging indent for list markers, in twips
pub const LIST_HANGING_TWIPS: u32 = 360;

/// Heading level h1..h4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Map a block tag name to a heading level
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            _ => None,
        }
    }

    /// Font size in half-points; strictly decreasing by level
    pub fn size_half_points(self) -> u32 {
        match self {
            Self::H1 => 36,
            Self::H2 => 32,
            Self::H3 => 28,
            Self::H4 => 26,
        }
    }

    /// Font size in points (run hint form)
    pub fn size_points(self) -> f32 {
        self.size_half_points() as f32 / 2.0
    }

    /// Spacing before/after in twips, scaled by level
    pub fn spacing_twips(self) -> (u32, u32) {
        match self {
            Self::H1 => (240, 120),
            Self::H2 => (200, 100),
            Self::H3 => (160, 80),
            Self::H4 => (140, 70),
        }
    }
}

/// One formatted run inside a paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct DocxRun {
    pub text: String,
    pub style: InlineStyle,
    /// Font size in points; the document default applies when `None`
    pub size: Option<f32>,
    /// Emit a `<w:br/>` before the text
    pub break_before: bool,
    /// Hex RGB color without `#` (appendix attachment names)
    pub color: Option<String>,
}

impl DocxRun {
    /// A plain run with default formatting
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: InlineStyle::default(),
            size: None,
            break_before: false,
            color: None,
        }
    }

    /// The synthesized empty run for content-less paragraphs
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Set the run color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the style
    pub fn with_style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }
}

impl From<StyledRun> for DocxRun {
    fn from(run: StyledRun) -> Self {
        Self {
            text: run.text,
            style: run.style,
            size: run.size,
            break_before: run.break_before,
            color: None,
        }
    }
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq)]
pub struct DocxParagraph {
    pub runs: Vec<DocxRun>,
    pub alignment: Alignment,
    pub heading: Option<HeadingLevel>,
    /// References the shared decimal numbering instance
    pub numbered: bool,
    /// Carries a literal bullet marker with hanging indent
    pub bullet: bool,
}

impl DocxParagraph {
    /// A body paragraph
    pub fn body(runs: Vec<DocxRun>, alignment: Alignment) -> Self {
        Self {
            runs,
            alignment,
            heading: None,
            numbered: false,
            bullet: false,
        }
    }

    /// A heading paragraph
    pub fn heading(level: HeadingLevel, runs: Vec<DocxRun>, alignment: Alignment) -> Self {
        Self {
            runs,
            alignment,
            heading: Some(level),
            numbered: false,
            bullet: false,
        }
    }

    /// An empty paragraph with one synthesized empty run
    pub fn empty() -> Self {
        Self::body(vec![DocxRun::empty()], Alignment::Left)
    }

    /// An ordered-list item paragraph
    pub fn numbered_item(runs: Vec<DocxRun>) -> Self {
        Self {
            runs,
            alignment: Alignment::Left,
            heading: None,
            numbered: true,
            bullet: false,
        }
    }

    /// An unordered-list item paragraph
    pub fn bullet_item(mut runs: Vec<DocxRun>) -> Self {
        runs.insert(0, DocxRun::text("\u{2022} "));
        Self {
            runs,
            alignment: Alignment::Left,
            heading: None,
            numbered: false,
            bullet: true,
        }
    }

    /// Concatenated text of all runs
    pub fn text_content(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub struct DocxTableCell {
    pub runs: Vec<DocxRun>,
    /// Header cells (`<th>`) render bold
    pub header: bool,
    /// Cell width as a percentage of the table width
    pub width_pct: f32,
}

/// One table row
#[derive(Debug, Clone, PartialEq)]
pub struct DocxTableRow {
    pub cells: Vec<DocxTableCell>,
}

/// A table block
#[derive(Debug, Clone, PartialEq)]
pub struct DocxTable {
    pub rows: Vec<DocxTableRow>,
}

/// A top-level block in the output document
#[derive(Debug, Clone, PartialEq)]
pub enum DocxBlock {
    Paragraph(DocxParagraph),
    Table(DocxTable),
    /// An explicit page-break-only paragraph
    PageBreak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_strictly_decrease() {
        let levels = [
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H4,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].size_half_points() > pair[1].size_half_points());
        }
    }

    #[test]
    fn test_heading_from_tag() {
        assert_eq!(HeadingLevel::from_tag("h1"), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_tag("h4"), Some(HeadingLevel::H4));
        assert_eq!(HeadingLevel::from_tag("h5"), None);
        assert_eq!(HeadingLevel::from_tag("p"), None);
    }

    #[test]
    fn test_empty_paragraph_has_single_empty_run() {
        let para = DocxParagraph::empty();
        assert_eq!(para.runs.len(), 1);
        assert_eq!(para.runs[0].text, "");
    }

    #[test]
    fn test_bullet_item_prepends_marker() {
        let para = DocxParagraph::bullet_item(vec![DocxRun::text("item")]);
        assert!(para.bullet);
        assert_eq!(para.runs[0].text, "\u{2022} ");
        assert_eq!(para.text_content(), "\u{2022} item");
    }
}
