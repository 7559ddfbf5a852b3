//! Text layout engine
//!
//! Computes pixel metrics for strings against a glyph table. Queries scan
//! the full string each call; the rendering engine memoizes results per
//! cached display entry.

use super::descriptor::GlyphDescriptor;
use super::table::GlyphTable;

/// Layout query engine over a borrowed glyph table
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'a> {
    table: &'a GlyphTable,
}

impl<'a> TextLayout<'a> {
    /// Create a layout engine over a glyph table
    pub fn new(table: &'a GlyphTable) -> Self {
        Self { table }
    }

    /// Measure the pixel width of `text`
    ///
    /// The running width resets on newlines and the result is the maximum
    /// over all lines. Every glyph contributes its advance except the one
    /// at the final character index, which contributes its visible width
    /// instead, so the measure bounds the rendered extent rather than the
    /// pen position. Codepoints without a glyph contribute nothing.
    pub fn width(&self, text: &str) -> i32 {
        let count = text.chars().count();
        let mut width: i32 = 0;
        let mut max_width: i32 = 0;
        let mut last: Option<&GlyphDescriptor> = None;

        for (index, ch) in text.chars().enumerate() {
            if ch == '\n' {
                width = 0;
                continue;
            }
            let glyph = match self.table.glyph(u32::from(ch)) {
                Some(glyph) => glyph,
                None => continue,
            };
            if let Some(prev) = last {
                width += prev.kerning_offset(u32::from(ch));
            }
            last = Some(glyph);
            if index + 1 < count {
                width += i32::from(glyph.advance);
            } else {
                width += i32::from(glyph.width);
            }
            max_width = max_width.max(width);
        }

        max_width
    }

    /// Measure the pixel height of `text`
    ///
    /// Each newline adds one full line height and resets the per-line
    /// accumulator; the final line contributes the tallest
    /// `height + y_offset` among its glyphs. Space and absent glyphs add
    /// no extent.
    pub fn height(&self, text: &str) -> i32 {
        let mut lines: i32 = 0;
        let mut extent: i32 = 0;

        for ch in text.chars() {
            if ch == '\n' {
                lines += 1;
                extent = 0;
                continue;
            }
            if ch == ' ' {
                continue;
            }
            let glyph = match self.table.glyph(u32::from(ch)) {
                Some(glyph) => glyph,
                None => continue,
            };
            extent = extent.max(i32::from(glyph.height) + i32::from(glyph.y_offset));
        }

        extent + lines * self.table.line_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = "\
info face=\"Test\" size=32 bold=0
common lineHeight=32 base=26 scaleW=256 scaleH=256
page id=0 file=\"test_0.png\"
chars count=4
char id=65 x=0 y=0 width=20 height=24 xoffset=1 yoffset=2 xadvance=22 page=0 chnl=0
char id=66 x=20 y=0 width=18 height=22 xoffset=1 yoffset=4 xadvance=20 page=0 chnl=0
char id=67 x=38 y=0 width=19 height=23 xoffset=1 yoffset=3 xadvance=21 page=0 chnl=0
char id=32 x=57 y=0 width=0 height=0 xoffset=0 yoffset=0 xadvance=8 page=0 chnl=0
kernings count=2
kerning first=65 second=66 amount=-2
kerning first=66 second=67 amount=-1
";

    fn table() -> GlyphTable {
        GlyphTable::from_descriptor(DESCRIPTOR).unwrap()
    }

    #[test]
    fn test_empty_string_measures_zero() {
        let table = table();
        let layout = TextLayout::new(&table);
        assert_eq!(layout.width(""), 0);
        assert_eq!(layout.height(""), 0);
    }

    #[test]
    fn test_single_line_width_uses_last_glyph_width() {
        let table = table();
        let layout = TextLayout::new(&table);

        // advance(A) + kern(A,B) + advance(B) + kern(B,C) + width(C)
        let expected = 22 - 2 + 20 - 1 + 19;
        assert_eq!(layout.width("ABC"), expected);
    }

    #[test]
    fn test_width_without_kerning_is_advances_plus_last_width() {
        let table = table();
        let layout = TextLayout::new(&table);

        // C carries no kerning toward A: advance(C) + advance(A) + width(A)
        assert_eq!(layout.width("CAA"), 21 + 22 + 20);
    }

    #[test]
    fn test_width_is_max_across_lines() {
        let table = table();
        let layout = TextLayout::new(&table);

        let long_line = layout.width("ABC\nA");
        // The first line ends in advance form since C is not the final
        // character of the string.
        assert_eq!(long_line, 22 - 2 + 20 - 1 + 21);
        assert!(long_line > layout.width("A"));
    }

    #[test]
    fn test_width_skips_unknown_codepoints() {
        let table = table();
        let layout = TextLayout::new(&table);
        assert_eq!(layout.width("A\u{4E2D}"), layout.width("A\u{7F}"));
    }

    #[test]
    fn test_multiline_height_adds_line_height() {
        let table = table();
        let layout = TextLayout::new(&table);

        // Tallest extent on the final line plus one full line height.
        assert_eq!(layout.height("AB\nC"), 26 + table.line_height());
        assert_eq!(layout.height("A"), 26);
    }

    #[test]
    fn test_height_skips_spaces() {
        let table = table();
        let layout = TextLayout::new(&table);
        assert_eq!(layout.height("A B"), layout.height("AB"));
        assert_eq!(layout.height(" "), 0);
    }
}
