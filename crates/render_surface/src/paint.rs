//! Painting the display list into a pixmap
//!
//! Glyph outlines come from the shaping face via ttf-parser and are
//! filled as tiny-skia paths. When shaping fell back to estimated
//! metrics, glyphs paint as placeholder boxes; geometry stays identical
//! either way, which is what the slicing stage depends on.

use crate::error::{RenderError, Result};
use crate::font::FontLibrary;
use crate::layout::{DisplayList, PaintItem};
use crate::stylesheet;
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Rasterize a display list at the given supersampling scale.
pub fn paint_display_list(
    display: &DisplayList,
    scale: f32,
    fonts: &FontLibrary,
) -> Result<Pixmap> {
    let width = (display.width * scale).round().max(1.0) as u32;
    let height = (display.height * scale).round().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(RenderError::SurfaceAllocation { width, height })?;
    pixmap.fill(Color::WHITE);

    let mut text_paint = Paint::default();
    let (r, g, b) = stylesheet::TEXT_COLOR;
    text_paint.set_color_rgba8(r, g, b, 255);
    text_paint.anti_alias = true;

    let mut placeholder_paint = Paint::default();
    let (r, g, b) = stylesheet::PLACEHOLDER_COLOR;
    placeholder_paint.set_color_rgba8(r, g, b, 255);

    let mut border_paint = Paint::default();
    let (r, g, b) = stylesheet::BORDER_COLOR;
    border_paint.set_color_rgba8(r, g, b, 255);
    border_paint.anti_alias = true;

    for item in &display.items {
        match item {
            PaintItem::Text(text) => {
                paint_text(
                    &mut pixmap,
                    fonts,
                    &text_paint,
                    &placeholder_paint,
                    text.x * scale,
                    text.baseline * scale,
                    &text.text,
                    text.size * scale,
                    text.bold,
                    text.italic,
                );
            }
            PaintItem::Rule(rule) => {
                if let Some(rect) = Rect::from_xywh(
                    rule.x * scale,
                    rule.y * scale,
                    rule.width * scale,
                    rule.thickness * scale,
                ) {
                    pixmap.fill_rect(rect, &text_paint, Transform::identity(), None);
                }
            }
            PaintItem::Border(border) => {
                if let Some(rect) = Rect::from_xywh(
                    border.x * scale,
                    border.y * scale,
                    border.width * scale,
                    border.height * scale,
                ) {
                    let path = PathBuilder::from_rect(rect);
                    let stroke = Stroke {
                        width: stylesheet::TABLE_BORDER_PX * scale,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &border_paint, &stroke, Transform::identity(), None);
                }
            }
        }
    }

    Ok(pixmap)
}

#[allow(clippy::too_many_arguments)]
fn paint_text(
    pixmap: &mut Pixmap,
    fonts: &FontLibrary,
    text_paint: &Paint<'_>,
    placeholder_paint: &Paint<'_>,
    x: f32,
    baseline: f32,
    text: &str,
    size: f32,
    bold: bool,
    italic: bool,
) {
    // Shaping is linear in size, so shaping at the scaled size keeps the
    // painted advances in step with the measured layout.
    let run = fonts.shape(text, size, bold, italic);

    if run.has_face {
        let Some(slot) = fonts.slot(bold, italic) else { return };
        let face = slot.face();
        let units = face.units_per_em() as f32;
        let glyph_scale = size / units;

        for glyph in &run.glyphs {
            let mut outline = GlyphPath {
                builder: PathBuilder::new(),
                scale: glyph_scale,
                x0: x + glyph.x,
                y0: baseline,
            };
            if face
                .outline_glyph(GlyphId(glyph.glyph_id), &mut outline)
                .is_none()
            {
                continue;
            }
            if let Some(path) = outline.builder.finish() {
                pixmap.fill_path(&path, text_paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    } else {
        // Placeholder boxes for fontless environments.
        let box_height = size * 0.72;
        for glyph in &run.glyphs {
            let visible = glyph.character.map(|c| !c.is_whitespace()).unwrap_or(false);
            if !visible {
                continue;
            }
            if let Some(rect) = Rect::from_xywh(
                x + glyph.x,
                baseline - box_height,
                (glyph.advance * 0.85).max(1.0),
                box_height,
            ) {
                pixmap.fill_rect(rect, placeholder_paint, Transform::identity(), None);
            }
        }
    }
}

/// Adapts ttf-parser outline callbacks into a tiny-skia path.
///
/// Font units are y-up; the pixmap is y-down, hence the negated y terms.
struct GlyphPath {
    builder: PathBuilder,
    scale: f32,
    x0: f32,
    y0: f32,
}

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder
            .move_to(self.x0 + x * self.scale, self.y0 - y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder
            .line_to(self.x0 + x * self.scale, self.y0 - y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.x0 + x1 * self.scale,
            self.y0 - y1 * self.scale,
            self.x0 + x * self.scale,
            self.y0 - y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.x0 + x1 * self.scale,
            self.y0 - y1 * self.scale,
            self.x0 + x2 * self.scale,
            self.y0 - y2 * self.scale,
            self.x0 + x * self.scale,
            self.y0 - y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
