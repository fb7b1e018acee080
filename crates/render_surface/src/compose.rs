//! Export HTML composition
//!
//! The PDF pipeline is handed a single root HTML fragment reflecting the
//! rendered document. Callers that already hold that markup pass it in
//! directly; this helper builds it from the Document Model for callers
//! that do not, inserting the page-break marker between sections.

use crate::stylesheet;
use doc_model::Document;

/// Concatenate a document's sections into one export fragment.
pub fn compose_export_html(document: &Document) -> String {
    let mut html = String::new();
    html.push_str("<h1>");
    html.push_str(&escape_html(&document.title));
    html.push_str("</h1>");

    for (index, section) in document.ordered_sections().into_iter().enumerate() {
        if index > 0 {
            html.push_str(&format!(
                r#"<div class="{}"></div>"#,
                stylesheet::PAGE_BREAK_CLASS
            ));
        }
        html.push_str("<h2>");
        html.push_str(&escape_html(&section.title));
        html.push_str("</h2>");
        html.push_str(&section.content);
    }

    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Section;

    #[test]
    fn test_compose_orders_sections_and_inserts_markers() {
        let mut doc = Document::new("Bid");
        doc.push_section(Section::new("2", "Later", "<p>two</p>", 2));
        doc.push_section(Section::new("1", "First", "<p>one</p>", 1));

        let html = compose_export_html(&doc);
        let first = html.find("<p>one</p>").unwrap();
        let later = html.find("<p>two</p>").unwrap();
        assert!(first < later);
        assert_eq!(html.matches(stylesheet::PAGE_BREAK_CLASS).count(), 1);
    }

    #[test]
    fn test_compose_escapes_titles() {
        let mut doc = Document::new("A & B");
        doc.push_section(Section::new("1", "<script>", "<p>x</p>", 1));
        let html = compose_export_html(&doc);
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_compose_single_section_has_no_marker() {
        let mut doc = Document::new("Bid");
        doc.push_section(Section::new("1", "Only", "<p>x</p>", 1));
        let html = compose_export_html(&doc);
        assert_eq!(html.matches(stylesheet::PAGE_BREAK_CLASS).count(), 0);
    }
}
