//! Glyph records and per-glyph kerning lookup

/// A kerning adjustment applied when `second` follows the owning glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KerningPair {
    /// Codepoint of the following glyph
    pub second: u8,
    /// Horizontal pen adjustment in pixels
    pub amount: i16,
}

/// A single renderable glyph parsed from a descriptor
///
/// Describes the glyph's source rectangle in the atlas, its placement
/// offsets, and its pen advance. Immutable once the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDescriptor {
    /// Glyph id (the codepoint it renders)
    pub id: u16,
    /// X position of the glyph image in the atlas, in pixels
    pub atlas_x: u16,
    /// Y position of the glyph image in the atlas, in pixels
    pub atlas_y: u16,
    /// Width of the glyph image in pixels
    pub width: u16,
    /// Height of the glyph image in pixels
    pub height: u16,
    /// Horizontal offset applied when placing the glyph image
    pub x_offset: i16,
    /// Vertical offset applied when placing the glyph image
    pub y_offset: i16,
    /// Horizontal pen movement when another glyph follows
    pub advance: u16,
    /// Kerning pairs, kept sorted by following codepoint
    pub(crate) kerning: Vec<KerningPair>,
}

impl GlyphDescriptor {
    /// Kerning pairs for this glyph, sorted by following codepoint
    pub fn kerning_pairs(&self) -> &[KerningPair] {
        &self.kerning
    }

    /// Pen adjustment when `next` follows this glyph
    ///
    /// Binary-searches the sorted pair array for an exact codepoint match.
    /// Glyphs without kerning, absent pairs, and codepoints outside the
    /// byte range all adjust by 0.
    pub fn kerning_offset(&self, next: u32) -> i32 {
        if self.kerning.is_empty() {
            return 0;
        }
        self.kerning
            .binary_search_by_key(&next, |pair| u32::from(pair.second))
            .map_or(0, |found| i32::from(self.kerning[found].amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_with_kerning(kerning: Vec<KerningPair>) -> GlyphDescriptor {
        GlyphDescriptor {
            id: 65,
            atlas_x: 0,
            atlas_y: 0,
            width: 10,
            height: 12,
            x_offset: 1,
            y_offset: 2,
            advance: 11,
            kerning,
        }
    }

    #[test]
    fn test_no_kerning_returns_zero() {
        let glyph = glyph_with_kerning(Vec::new());
        assert_eq!(glyph.kerning_offset(66), 0);
    }

    #[test]
    fn test_exact_matches_and_absent_codepoints() {
        let glyph = glyph_with_kerning(vec![
            KerningPair { second: 10, amount: -3 },
            KerningPair { second: 66, amount: -2 },
            KerningPair { second: 200, amount: 4 },
        ]);

        for codepoint in 0u32..=255 {
            let expected = match codepoint {
                10 => -3,
                66 => -2,
                200 => 4,
                _ => 0,
            };
            assert_eq!(glyph.kerning_offset(codepoint), expected);
        }
    }

    #[test]
    fn test_codepoint_beyond_byte_range() {
        let glyph = glyph_with_kerning(vec![KerningPair { second: 66, amount: -2 }]);
        assert_eq!(glyph.kerning_offset(0x4E2D), 0);
    }
}
