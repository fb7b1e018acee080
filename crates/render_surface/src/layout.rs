//! Block and line layout
//!
//! Turns a parsed HTML tree into a display list of positioned text and
//! border items under the base stylesheet. Line breaking is the greedy
//! UAX #14 fill: shape each segment between break opportunities, place
//! segments until the line is full, then start the next line.

use crate::font::FontLibrary;
use crate::stylesheet;
use html_tree::{
    alignment_of, runs_for_block, Alignment, HtmlElement, HtmlNode, InlineStyle, StyledRun,
};
use unicode_linebreak::linebreaks;

/// A positioned text run ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub x: f32,
    /// Baseline y position
    pub baseline: f32,
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

/// A horizontal rule (underlines)
#[derive(Debug, Clone, PartialEq)]
pub struct RuleItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub thickness: f32,
}

/// A stroked rectangle (table cell borders)
#[derive(Debug, Clone, PartialEq)]
pub struct BorderItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One paintable item
#[derive(Debug, Clone, PartialEq)]
pub enum PaintItem {
    Text(TextItem),
    Rule(RuleItem),
    Border(BorderItem),
}

impl PaintItem {
    fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            PaintItem::Text(t) => {
                t.x += dx;
                t.baseline += dy;
            }
            PaintItem::Rule(r) => {
                r.x += dx;
                r.y += dy;
            }
            PaintItem::Border(b) => {
                b.x += dx;
                b.y += dy;
            }
        }
    }
}

/// The laid-out document, in CSS pixels
#[derive(Debug, Clone)]
pub struct DisplayList {
    pub width: f32,
    pub height: f32,
    pub items: Vec<PaintItem>,
}

/// Lay out a parsed fragment at a fixed surface width.
pub fn layout_document(fonts: &FontLibrary, nodes: &[HtmlNode], width: f32) -> DisplayList {
    let mut flow = BlockFlow {
        fonts,
        items: Vec::new(),
        cursor: stylesheet::PAGE_PADDING_PX,
        x0: stylesheet::PAGE_PADDING_PX,
        x1: width - stylesheet::PAGE_PADDING_PX,
    };
    flow.flow_nodes(nodes);

    // Even an empty document occupies one body line.
    let min_height = stylesheet::PAGE_PADDING_PX + fonts.line_height(stylesheet::BODY_SIZE_PX);
    let content_bottom = flow.cursor.max(min_height);

    DisplayList {
        width,
        height: content_bottom + stylesheet::PAGE_PADDING_PX,
        items: flow.items,
    }
}

struct BlockFlow<'a> {
    fonts: &'a FontLibrary,
    items: Vec<PaintItem>,
    cursor: f32,
    x0: f32,
    x1: f32,
}

impl BlockFlow<'_> {
    fn avail(&self) -> f32 {
        self.x1 - self.x0
    }

    fn flow_nodes(&mut self, nodes: &[HtmlNode]) {
        for node in nodes {
            match node {
                HtmlNode::Text(text) => {
                    // Stray non-empty text at block level renders as a
                    // plain paragraph.
                    if !text.trim().is_empty() {
                        let runs =
                            vec![StyledRun::new(text.clone(), InlineStyle::default(), None)];
                        self.flow_paragraph(&runs, stylesheet::BODY_SIZE_PX, Alignment::Left);
                        self.cursor += stylesheet::BLOCK_SPACING_PX;
                    }
                }
                HtmlNode::Element(el) => self.flow_element(el),
            }
        }
    }

    fn flow_element(&mut self, el: &HtmlElement) {
        match el.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" => {
                let level = el.tag.as_bytes()[1] - b'0';
                let size = stylesheet::heading_size_px(level);
                let runs = runs_for_block(el, InlineStyle::default().with_bold(), Some(size));
                self.cursor += stylesheet::heading_space_before_px(level);
                self.flow_paragraph(&runs, size, alignment_of(el));
                self.cursor += stylesheet::heading_space_after_px(level);
            }
            "p" => {
                let runs = runs_for_block(el, InlineStyle::default(), None);
                self.flow_paragraph(&runs, stylesheet::BODY_SIZE_PX, alignment_of(el));
                self.cursor += stylesheet::BLOCK_SPACING_PX;
            }
            "ul" => self.flow_list(el, false),
            "ol" => self.flow_list(el, true),
            "table" => self.flow_table(el),
            "br" => {
                self.cursor += self.fonts.line_height(stylesheet::BODY_SIZE_PX);
            }
            "div" if has_class(el, stylesheet::PAGE_BREAK_CLASS) => {
                self.cursor += stylesheet::PAGE_BREAK_GAP_PX;
            }
            // Any other element is a transparent container.
            _ => self.flow_nodes(&el.children),
        }
    }

    fn flow_paragraph(&mut self, runs: &[StyledRun], default_size: f32, alignment: Alignment) {
        let (mut items, height) =
            layout_inline(self.fonts, runs, default_size, alignment, self.avail());
        for item in &mut items {
            item.translate(self.x0, self.cursor);
        }
        self.items.extend(items);
        self.cursor += height;
    }

    fn flow_list(&mut self, el: &HtmlElement, ordered: bool) {
        let mut index = 1u32;
        for child in &el.children {
            let Some(li) = child.as_element() else { continue };
            if !li.tag_is("li") {
                continue;
            }

            let marker = if ordered {
                format!("{index}.")
            } else {
                "\u{2022}".to_string()
            };
            let marker_run = self.fonts.shape(&marker, stylesheet::BODY_SIZE_PX, false, false);

            let text_x0 = self.x0 + stylesheet::LIST_INDENT_PX;
            let runs = runs_for_block(li, InlineStyle::default(), None);
            let (mut items, height) = layout_inline(
                self.fonts,
                &runs,
                stylesheet::BODY_SIZE_PX,
                Alignment::Left,
                self.x1 - text_x0,
            );
            for item in &mut items {
                item.translate(text_x0, self.cursor);
            }

            // The marker hangs left of the first line's baseline.
            let first_baseline = items
                .iter()
                .find_map(|item| match item {
                    PaintItem::Text(t) => Some(t.baseline),
                    _ => None,
                })
                .unwrap_or(self.cursor + marker_run.ascent);
            self.items.push(PaintItem::Text(TextItem {
                x: text_x0 - stylesheet::LIST_MARKER_GAP_PX - marker_run.width,
                baseline: first_baseline,
                text: marker,
                size: stylesheet::BODY_SIZE_PX,
                bold: false,
                italic: false,
            }));

            self.items.extend(items);
            self.cursor += height;
            index += 1;
        }
        self.cursor += stylesheet::BLOCK_SPACING_PX;
    }

    fn flow_table(&mut self, el: &HtmlElement) {
        let rows = table_rows(el);
        if rows.is_empty() {
            return;
        }

        let pad = stylesheet::TABLE_CELL_PADDING_PX;
        for row in rows {
            let cols = row.len().max(1);
            let cell_w = self.avail() / cols as f32;

            let mut laid_cells = Vec::with_capacity(row.len());
            let mut row_height = self.fonts.line_height(stylesheet::BODY_SIZE_PX);
            for (header, runs) in &row {
                let cell_runs: Vec<StyledRun> = if *header {
                    runs.iter()
                        .map(|r| StyledRun {
                            style: r.style.with_bold(),
                            ..r.clone()
                        })
                        .collect()
                } else {
                    runs.clone()
                };
                let (items, height) = layout_inline(
                    self.fonts,
                    &cell_runs,
                    stylesheet::BODY_SIZE_PX,
                    Alignment::Left,
                    cell_w - 2.0 * pad,
                );
                row_height = row_height.max(height);
                laid_cells.push(items);
            }

            let row_box_height = row_height + 2.0 * pad;
            for (i, mut items) in laid_cells.into_iter().enumerate() {
                let cell_x = self.x0 + i as f32 * cell_w;
                for item in &mut items {
                    item.translate(cell_x + pad, self.cursor + pad);
                }
                self.items.extend(items);
                self.items.push(PaintItem::Border(BorderItem {
                    x: cell_x,
                    y: self.cursor,
                    width: cell_w,
                    height: row_box_height,
                }));
            }
            self.cursor += row_box_height;
        }
        self.cursor += stylesheet::BLOCK_SPACING_PX;
    }
}

fn has_class(el: &HtmlElement, class: &str) -> bool {
    el.attr("class")
        .map(|v| v.split_ascii_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Extract table rows as (is-header-cell, runs) pairs.
fn table_rows(el: &HtmlElement) -> Vec<Vec<(bool, Vec<StyledRun>)>> {
    let mut rows = Vec::new();
    collect_rows(el, &mut rows);
    rows
}

fn collect_rows(el: &HtmlElement, rows: &mut Vec<Vec<(bool, Vec<StyledRun>)>>) {
    for child in &el.children {
        let Some(child_el) = child.as_element() else { continue };
        match child_el.tag.as_str() {
            "thead" | "tbody" | "tfoot" => collect_rows(child_el, rows),
            "tr" => {
                let mut cells = Vec::new();
                for cell in &child_el.children {
                    let Some(cell_el) = cell.as_element() else { continue };
                    if cell_el.tag_is("td") || cell_el.tag_is("th") {
                        cells.push((
                            cell_el.tag_is("th"),
                            runs_for_block(cell_el, InlineStyle::default(), None),
                        ));
                    }
                }
                if !cells.is_empty() {
                    rows.push(cells);
                }
            }
            _ => {}
        }
    }
}

/// A measured word on a line
struct LineWord {
    text: String,
    style: InlineStyle,
    size: f32,
    x: f32,
    width: f32,
    ascent: f32,
    descent: f32,
}

/// Lay out inline runs into lines within `avail_width`.
///
/// Returns items positioned relative to (0, 0) plus the total height.
fn layout_inline(
    fonts: &FontLibrary,
    runs: &[StyledRun],
    default_size: f32,
    alignment: Alignment,
    avail_width: f32,
) -> (Vec<PaintItem>, f32) {
    // Phase 1: greedy line fill.
    let mut lines: Vec<Vec<LineWord>> = Vec::new();
    let mut line: Vec<LineWord> = Vec::new();
    let mut line_x = 0.0f32;

    for run in runs {
        if run.break_before {
            lines.push(std::mem::take(&mut line));
            line_x = 0.0;
        }
        let size = run.size.unwrap_or(default_size);
        for segment in break_segments(&run.text) {
            let mut text = segment;
            if line.is_empty() {
                text = segment.trim_start();
                if text.is_empty() {
                    continue;
                }
            }
            let mut shaped = fonts.shape(text, size, run.style.bold, run.style.italic);
            if line_x + shaped.width > avail_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_x = 0.0;
                text = segment.trim_start();
                if text.is_empty() {
                    continue;
                }
                shaped = fonts.shape(text, size, run.style.bold, run.style.italic);
            }
            line.push(LineWord {
                x: line_x,
                width: shaped.width,
                ascent: shaped.ascent,
                descent: shaped.descent,
                text: text.to_string(),
                style: run.style,
                size,
            });
            line_x += shaped.width;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    // Phase 2: place lines.
    let mut items = Vec::new();
    let mut cursor_y = 0.0f32;
    for line in lines {
        cursor_y += place_line(
            fonts,
            line,
            default_size,
            alignment,
            avail_width,
            cursor_y,
            &mut items,
        );
    }
    (items, cursor_y)
}

/// Place one filled line and return its height.
fn place_line(
    fonts: &FontLibrary,
    line: Vec<LineWord>,
    default_size: f32,
    alignment: Alignment,
    avail_width: f32,
    y: f32,
    items: &mut Vec<PaintItem>,
) -> f32 {
    let mut line_height = fonts.line_height(default_size);
    let mut ascent = default_size * 0.8;
    let mut descent = default_size * 0.2;
    for word in &line {
        line_height = line_height.max(fonts.line_height(word.size));
        ascent = ascent.max(word.ascent);
        descent = descent.max(word.descent);
    }

    let leading = (line_height - (ascent + descent)).max(0.0);
    let baseline = y + leading / 2.0 + ascent;

    // Trailing whitespace does not count toward alignment.
    let content_width = line
        .iter()
        .rev()
        .find(|w| !w.text.trim().is_empty())
        .map(|w| w.x + w.width)
        .unwrap_or(0.0);
    let shift = match alignment {
        Alignment::Left => 0.0,
        Alignment::Center => ((avail_width - content_width) / 2.0).max(0.0),
        Alignment::Right => (avail_width - content_width).max(0.0),
    };

    for word in line {
        if word.text.is_empty() {
            continue;
        }
        let x = word.x + shift;
        if word.style.underline && !word.text.trim().is_empty() {
            items.push(PaintItem::Rule(RuleItem {
                x,
                y: baseline + 2.0,
                width: word.width,
                thickness: (word.size / 14.0).max(1.0),
            }));
        }
        items.push(PaintItem::Text(TextItem {
            x,
            baseline,
            text: word.text,
            size: word.size,
            bold: word.style.bold,
            italic: word.style.italic,
        }));
    }

    line_height
}

/// Split text into segments at UAX #14 break opportunities.
fn break_segments(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut segments = Vec::new();
    let mut start = 0;
    for (index, _) in linebreaks(text) {
        if index > start {
            segments.push(&text[start..index]);
            start = index;
        }
    }
    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}
