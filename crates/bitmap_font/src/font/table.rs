//! Dense glyph storage and font-wide metrics

use super::descriptor::GlyphDescriptor;
use super::error::FontResult;
use super::parser;

/// Highest glyph id a descriptor may declare by default
pub const DEFAULT_MAX_GLYPH_ID: u16 = 255;

/// Immutable glyph table built from a BMFont descriptor
///
/// Glyphs live in a dense array indexed by id, sized to the highest
/// observed id; absent ids hold no descriptor. The table also carries the
/// font-wide line height and the verbatim header lines for diagnostics.
/// Read-only for the engine's lifetime once built.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: Vec<Option<GlyphDescriptor>>,
    line_height: i32,
    info: String,
    common: String,
    page: String,
}

impl GlyphTable {
    pub(crate) fn new(
        glyphs: Vec<Option<GlyphDescriptor>>,
        line_height: i32,
        info: String,
        common: String,
        page: String,
    ) -> Self {
        Self {
            glyphs,
            line_height,
            info,
            common,
            page,
        }
    }

    /// Parse a descriptor with the default maximum glyph id
    pub fn from_descriptor(text: &str) -> FontResult<Self> {
        parser::parse(text, DEFAULT_MAX_GLYPH_ID)
    }

    /// Parse a descriptor, failing on glyph ids above `max_glyph_id`
    pub fn from_descriptor_with_max(text: &str, max_glyph_id: u16) -> FontResult<Self> {
        parser::parse(text, max_glyph_id)
    }

    /// Look up the glyph for a codepoint
    ///
    /// Codepoints beyond the table and ids with no parsed glyph resolve to
    /// `None`; callers treat both as contributing nothing.
    pub fn glyph(&self, codepoint: u32) -> Option<&GlyphDescriptor> {
        self.glyphs.get(codepoint as usize).and_then(Option::as_ref)
    }

    /// Number of id slots (highest observed id + 1)
    pub fn slot_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of populated glyph slots
    pub fn glyph_count(&self) -> usize {
        self.glyphs.iter().filter(|slot| slot.is_some()).count()
    }

    /// Vertical distance between baselines of consecutive lines
    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    /// Verbatim `info` header line
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Verbatim `common` header line
    pub fn common(&self) -> &str {
        &self.common
    }

    /// Verbatim `page` header line
    pub fn page(&self) -> &str {
        &self.page
    }
}
