//! Font discovery and text shaping
//!
//! Fonts are discovered through font-kit's system source and shaped with
//! rustybuzz. When no usable system font exists (headless CI images, bare
//! containers), shaping falls back to estimated character metrics so that
//! layout geometry - and therefore page slicing - stays deterministic.

use crate::stylesheet;
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::{Properties, Style, Weight};
use font_kit::source::SystemSource;
use std::sync::Arc;

/// Fallback metrics used when no system font is available
#[derive(Debug, Clone, Copy)]
struct FallbackMetrics {
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

impl Default for FallbackMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
        }
    }
}

/// A loaded font face kept alive for shaping and outlining
pub struct FontSlot {
    /// The font data (kept alive for rustybuzz)
    #[allow(dead_code)]
    data: Arc<Vec<u8>>,
    face: rustybuzz::Face<'static>,
}

impl FontSlot {
    fn from_bytes(data: Vec<u8>, index: u32) -> Option<Self> {
        let data = Arc::new(data);
        // SAFETY: the Arc lives in this slot for as long as the face does,
        // so the borrowed slice never outlives its backing storage.
        let static_data: &'static [u8] =
            unsafe { std::mem::transmute::<&[u8], &'static [u8]>(data.as_slice()) };
        let face = rustybuzz::Face::from_slice(static_data, index)?;
        Some(Self { data, face })
    }

    /// The shaping/outlining face
    pub fn face(&self) -> &rustybuzz::Face<'static> {
        &self.face
    }
}

/// One positioned glyph in a shaped run
#[derive(Debug, Clone, Copy)]
pub struct PlacedGlyph {
    /// Glyph ID in the face (unused in fallback shaping)
    pub glyph_id: u16,
    /// X offset from the run origin, in pixels
    pub x: f32,
    /// Advance width in pixels
    pub advance: f32,
    /// Source character, set when shaping fell back to estimation
    pub character: Option<char>,
}

/// A run of shaped glyphs with scaled metrics
#[derive(Debug, Clone)]
pub struct GlyphRun {
    pub glyphs: Vec<PlacedGlyph>,
    /// Total advance width in pixels
    pub width: f32,
    /// Ascender above the baseline in pixels
    pub ascent: f32,
    /// Descender below the baseline in pixels (positive)
    pub descent: f32,
    /// Whether a real face produced this run
    pub has_face: bool,
}

/// The sans-serif family set the surface draws with.
///
/// Holds regular/bold/italic/bold-italic slots; any missing variant falls
/// back to regular, and a fully fontless system falls back to metric
/// estimation.
pub struct FontLibrary {
    regular: Option<FontSlot>,
    bold: Option<FontSlot>,
    italic: Option<FontSlot>,
    bold_italic: Option<FontSlot>,
    fallback: FallbackMetrics,
}

impl FontLibrary {
    /// Discover the surface's sans-serif variants from the system.
    ///
    /// Discovery never fails; missing variants degrade to the regular
    /// face, and a system with no fonts at all degrades to estimation.
    pub fn discover() -> Self {
        let source = SystemSource::new();
        let regular = Self::select(&source, Weight::NORMAL, Style::Normal);
        let bold = Self::select(&source, Weight::BOLD, Style::Normal);
        let italic = Self::select(&source, Weight::NORMAL, Style::Italic);
        let bold_italic = Self::select(&source, Weight::BOLD, Style::Italic);

        if regular.is_none() {
            tracing::warn!(
                "no system sans-serif font found; rendering with estimated metrics"
            );
        }

        Self {
            regular,
            bold,
            italic,
            bold_italic,
            fallback: FallbackMetrics::default(),
        }
    }

    /// A library with no faces, shaping purely by estimation.
    pub fn estimation_only() -> Self {
        Self {
            regular: None,
            bold: None,
            italic: None,
            bold_italic: None,
            fallback: FallbackMetrics::default(),
        }
    }

    fn select(source: &SystemSource, weight: Weight, style: Style) -> Option<FontSlot> {
        let properties = Properties {
            weight,
            style,
            ..Default::default()
        };
        let handle = source
            .select_best_match(&[FamilyName::SansSerif], &properties)
            .ok()?;

        match handle {
            Handle::Path { path, font_index } => {
                let data = std::fs::read(&path).ok()?;
                FontSlot::from_bytes(data, font_index)
            }
            Handle::Memory { bytes, font_index } => {
                FontSlot::from_bytes(bytes.as_ref().clone(), font_index)
            }
        }
    }

    /// Resolve the face for a style combination, if any is loaded
    pub fn slot(&self, bold: bool, italic: bool) -> Option<&FontSlot> {
        let preferred = match (bold, italic) {
            (true, true) => self.bold_italic.as_ref(),
            (true, false) => self.bold.as_ref(),
            (false, true) => self.italic.as_ref(),
            (false, false) => self.regular.as_ref(),
        };
        preferred.or(self.regular.as_ref())
    }

    /// Shape a text string at a pixel size.
    pub fn shape(&self, text: &str, size_px: f32, bold: bool, italic: bool) -> GlyphRun {
        match self.slot(bold, italic) {
            Some(slot) => Self::shape_with_face(slot.face(), text, size_px),
            None => self.shape_estimated(text, size_px),
        }
    }

    /// Line height for a pixel size under the base stylesheet
    pub fn line_height(&self, size_px: f32) -> f32 {
        size_px * stylesheet::LINE_HEIGHT
    }

    fn shape_with_face(face: &rustybuzz::Face<'_>, text: &str, size_px: f32) -> GlyphRun {
        let units_per_em = face.units_per_em();
        let scale = size_px / units_per_em as f32;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        let output = rustybuzz::shape(face, &[], buffer);

        let infos = output.glyph_infos();
        let positions = output.glyph_positions();

        let mut glyphs = Vec::with_capacity(infos.len());
        let mut cursor = 0.0f32;
        for (info, pos) in infos.iter().zip(positions.iter()) {
            let advance = pos.x_advance as f32 * scale;
            glyphs.push(PlacedGlyph {
                glyph_id: info.glyph_id as u16,
                x: cursor + pos.x_offset as f32 * scale,
                advance,
                character: None,
            });
            cursor += advance;
        }

        GlyphRun {
            glyphs,
            width: cursor,
            ascent: face.ascender() as f32 * scale,
            descent: face.descender().abs() as f32 * scale,
            has_face: true,
        }
    }

    /// Estimation shaping when no font is available.
    fn shape_estimated(&self, text: &str, size_px: f32) -> GlyphRun {
        let upem = self.fallback.units_per_em as f32;
        let scale = size_px / upem;

        let mut glyphs = Vec::new();
        let mut cursor = 0.0f32;
        for ch in text.chars() {
            let advance = estimate_char_width(ch, self.fallback.units_per_em) as f32 * scale;
            glyphs.push(PlacedGlyph {
                glyph_id: 0,
                x: cursor,
                advance,
                character: Some(ch),
            });
            cursor += advance;
        }

        GlyphRun {
            glyphs,
            width: cursor,
            ascent: self.fallback.ascender as f32 * scale,
            descent: self.fallback.descender.abs() as f32 * scale,
            has_face: false,
        }
    }
}

/// Estimate a character's advance width in font units.
fn estimate_char_width(ch: char, units_per_em: u16) -> i32 {
    let em = units_per_em as i32;

    match ch {
        // Narrow characters
        ' ' | 'i' | 'l' | 'j' | 't' | 'f' | 'r' | '!' | '|' | '\'' | '`' | '.' | ',' | ':'
        | ';' => em * 30 / 100,
        // Very narrow
        'I' | '1' => em * 35 / 100,
        // Wide characters
        'm' | 'w' | 'M' | 'W' | '@' | '%' => em * 90 / 100,
        // Uppercase typically wider
        'A'..='Z' => em * 70 / 100,
        // Lowercase average
        'a'..='z' => em * 55 / 100,
        // Digits are typically monospaced
        '0'..='9' => em * 60 / 100,
        // CJK characters are full-width
        '\u{4E00}'..='\u{9FFF}' | '\u{3000}'..='\u{303F}' => em,
        // Zero-width characters
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => 0,
        // No-break space same as regular space
        '\u{00A0}' => em * 30 / 100,
        // Default width
        _ => em * 60 / 100,
    }
}
