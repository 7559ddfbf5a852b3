//! BMFont descriptor parsing
//!
//! The descriptor is line-oriented: three mandatory header lines, then
//! glyph lines and kerning lines classified by a fixed prefix. Fields
//! within a line are positional key=value pairs read in declared order;
//! the format is not key-addressed.

use std::collections::HashMap;
use std::str::FromStr;

use super::descriptor::{GlyphDescriptor, KerningPair};
use super::error::{FontError, FontResult};
use super::table::GlyphTable;

const SPACE_ID: u16 = 32;

/// Parse descriptor text into a glyph table
///
/// Fails on a missing header line, a glyph id above `max_glyph_id`, or a
/// malformed numeric field. Everything else degrades: unknown line kinds
/// are ignored, negative glyph ids are skipped, and kerning pairs that
/// reference no parsed glyph are dropped.
pub(crate) fn parse(text: &str, max_glyph_id: u16) -> FontResult<GlyphTable> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let info = expect_header(lines.next(), "info")?;
    let common = expect_header(lines.next(), "common")?;
    let page = expect_header(lines.next(), "page")?;

    let mut glyphs: Vec<GlyphDescriptor> = Vec::new();
    let mut kerning: HashMap<u16, Vec<KerningPair>> = HashMap::new();
    let mut max_id: u16 = 0;
    let mut line_height: i32 = 0;

    for line in lines {
        if line.starts_with("chars c") {
            // glyph-count line, nothing to read
        } else if line.starts_with("char") {
            if let Some(glyph) = parse_glyph(line, max_glyph_id)? {
                if glyph.id != SPACE_ID {
                    // Space has no visible ascent or descent to factor in.
                    line_height =
                        line_height.max(i32::from(glyph.height) + i32::from(glyph.y_offset));
                }
                max_id = max_id.max(glyph.id);
                glyphs.push(glyph);
            }
        } else if line.starts_with("kernings c") {
            // kerning-count line, nothing to read
        } else if line.starts_with("kerning") {
            if let Some((first, pair)) = parse_kerning(line)? {
                kerning.entry(first).or_default().push(pair);
            }
        }
    }

    let mut slots: Vec<Option<GlyphDescriptor>> = (0..=max_id).map(|_| None).collect();
    for glyph in glyphs {
        let id = usize::from(glyph.id);
        slots[id] = Some(glyph);
    }

    for (first, mut pairs) in kerning {
        // Stable sort over the reversed list: the first entry of each
        // equal-codepoint run is the last one registered, so dedup keeps
        // the last-written amount.
        pairs.reverse();
        pairs.sort_by_key(|pair| pair.second);
        pairs.dedup_by_key(|pair| pair.second);

        match slots.get_mut(usize::from(first)).and_then(Option::as_mut) {
            Some(glyph) => glyph.kerning = pairs,
            None => {
                log::debug!(
                    "dropping {} kerning pair(s) for unparsed glyph id {}",
                    pairs.len(),
                    first
                );
            }
        }
    }

    let glyph_count = slots.iter().filter(|slot| slot.is_some()).count();
    log::debug!(
        "parsed descriptor: {} glyphs in {} slots, line height {}",
        glyph_count,
        slots.len(),
        line_height
    );

    Ok(GlyphTable::new(slots, line_height, info, common, page))
}

fn expect_header(line: Option<&str>, name: &'static str) -> FontResult<String> {
    match line {
        Some(line) if line.starts_with(name) => Ok(line.to_owned()),
        _ => Err(FontError::MissingHeader(name)),
    }
}

fn parse_glyph(line: &str, max_glyph_id: u16) -> FontResult<Option<GlyphDescriptor>> {
    let mut fields = Fields::new(line, "char");

    let id: i32 = fields.value("id")?;
    if id < 0 {
        return Ok(None);
    }
    if id > i32::from(max_glyph_id) {
        return Err(FontError::GlyphIdOutOfRange {
            id: id as u32,
            max: max_glyph_id,
        });
    }

    Ok(Some(GlyphDescriptor {
        id: id as u16,
        atlas_x: fields.value("x")?,
        atlas_y: fields.value("y")?,
        width: fields.value("width")?,
        height: fields.value("height")?,
        x_offset: fields.value("xoffset")?,
        y_offset: fields.value("yoffset")?,
        advance: fields.value("xadvance")?,
        kerning: Vec::new(),
    }))
}

fn parse_kerning(line: &str) -> FontResult<Option<(u16, KerningPair)>> {
    let mut fields = Fields::new(line, "kerning");

    let first: u16 = fields.value("first")?;
    let second: i32 = fields.value("second")?;
    let amount: i16 = fields.value("amount")?;

    if !(0..=255).contains(&second) {
        // Kerning only applies within the byte codepoint domain.
        return Ok(None);
    }

    Ok(Some((
        first,
        KerningPair {
            second: second as u8,
            amount,
        },
    )))
}

/// Positional field reader over one descriptor line
///
/// Tokens are split on spaces and `=`; each read skips the key token and
/// parses the following value token, so fields must arrive in declared
/// order. Trailing fields are simply never read.
struct Fields<'a> {
    kind: &'static str,
    tokens: Vec<&'a str>,
    next: usize,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str, kind: &'static str) -> Self {
        Self {
            kind,
            tokens: line
                .split([' ', '='])
                .filter(|token| !token.is_empty())
                .collect(),
            // index 0 is the line marker token
            next: 1,
        }
    }

    fn value<T>(&mut self, field: &'static str) -> FontResult<T>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        let token = self
            .tokens
            .get(self.next + 1)
            .ok_or(FontError::TruncatedLine {
                line: self.kind,
                field,
            })?;
        self.next += 2;
        token.parse().map_err(|source| FontError::InvalidField {
            line: self.kind,
            field,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = "\
info face=\"Test\" size=32 bold=0 italic=0
common lineHeight=32 base=26 scaleW=256 scaleH=256 pages=1
page id=0 file=\"test_0.png\"
chars count=4
char id=65 x=0 y=0 width=20 height=24 xoffset=1 yoffset=2 xadvance=22 page=0 chnl=0
char id=66 x=20 y=0 width=18 height=22 xoffset=1 yoffset=4 xadvance=20 page=0 chnl=0
char id=67 x=38 y=0 width=19 height=23 xoffset=1 yoffset=3 xadvance=21 page=0 chnl=0
char id=32 x=57 y=0 width=0 height=40 xoffset=0 yoffset=0 xadvance=8 page=0 chnl=0
kernings count=2
kerning first=65 second=66 amount=-2
kerning first=66 second=67 amount=-1
";

    #[test]
    fn test_parse_glyphs_and_headers() {
        let table = parse(DESCRIPTOR, 255).unwrap();

        assert_eq!(table.glyph_count(), 4);
        assert_eq!(table.slot_count(), 68);
        assert!(table.info().starts_with("info face=\"Test\""));
        assert!(table.common().starts_with("common lineHeight=32"));
        assert!(table.page().starts_with("page id=0"));

        let a = table.glyph(65).unwrap();
        assert_eq!(a.atlas_x, 0);
        assert_eq!(a.width, 20);
        assert_eq!(a.height, 24);
        assert_eq!(a.x_offset, 1);
        assert_eq!(a.y_offset, 2);
        assert_eq!(a.advance, 22);

        assert!(table.glyph(64).is_none());
        assert!(table.glyph(1000).is_none());
    }

    #[test]
    fn test_line_height_excludes_space() {
        // The space glyph's height+yoffset of 40 must not win.
        let table = parse(DESCRIPTOR, 255).unwrap();
        assert_eq!(table.line_height(), 26);
    }

    #[test]
    fn test_kerning_attached_and_sorted() {
        let table = parse(DESCRIPTOR, 255).unwrap();
        let a = table.glyph(65).unwrap();
        assert_eq!(a.kerning_offset(66), -2);
        assert_eq!(a.kerning_offset(67), 0);
        let b = table.glyph(66).unwrap();
        assert_eq!(b.kerning_offset(67), -1);
    }

    #[test]
    fn test_kerning_order_independent() {
        let forward = parse(DESCRIPTOR, 255).unwrap();

        let mut reordered_lines: Vec<&str> = DESCRIPTOR.lines().collect();
        let kerning_lines = reordered_lines.len() - 2..reordered_lines.len();
        reordered_lines[kerning_lines].reverse();
        let reordered = reordered_lines.join("\n");
        let backward = parse(&reordered, 255).unwrap();

        for codepoint in 0..=255 {
            assert_eq!(
                forward.glyph(65).unwrap().kerning_offset(codepoint),
                backward.glyph(65).unwrap().kerning_offset(codepoint)
            );
        }
    }

    #[test]
    fn test_duplicate_kerning_last_write_wins() {
        let text = format!(
            "{DESCRIPTOR}kerning first=65 second=66 amount=7\n"
        );
        let table = parse(&text, 255).unwrap();
        assert_eq!(table.glyph(65).unwrap().kerning_offset(66), 7);
        // A single entry survives for the duplicated pair.
        assert_eq!(table.glyph(65).unwrap().kerning_pairs().len(), 1);
    }

    #[test]
    fn test_orphan_kerning_dropped() {
        let text = format!("{DESCRIPTOR}kerning first=90 second=66 amount=5\n");
        let table = parse(&text, 255).unwrap();
        assert!(table.glyph(90).is_none());
    }

    #[test]
    fn test_missing_header_errors() {
        let err = parse("", 255).unwrap_err();
        assert!(matches!(err, FontError::MissingHeader("info")));

        let err = parse("info face=\"Test\"\ncommon lineHeight=32\n", 255).unwrap_err();
        assert!(matches!(err, FontError::MissingHeader("page")));
    }

    #[test]
    fn test_glyph_id_above_maximum_errors() {
        let text = "\
info face=\"Test\"
common lineHeight=32
page id=0 file=\"t.png\"
char id=300 x=0 y=0 width=1 height=1 xoffset=0 yoffset=0 xadvance=1
";
        let err = parse(text, 255).unwrap_err();
        assert!(matches!(
            err,
            FontError::GlyphIdOutOfRange { id: 300, max: 255 }
        ));

        // A tighter configured maximum rejects ids the default accepts.
        let err = parse(DESCRIPTOR, 64).unwrap_err();
        assert!(matches!(err, FontError::GlyphIdOutOfRange { id: 65, .. }));
    }

    #[test]
    fn test_negative_glyph_id_skipped() {
        let text = "\
info face=\"Test\"
common lineHeight=32
page id=0 file=\"t.png\"
char id=-1 x=0 y=0 width=1 height=1 xoffset=0 yoffset=0 xadvance=1
char id=65 x=0 y=0 width=20 height=24 xoffset=1 yoffset=2 xadvance=22
";
        let table = parse(text, 255).unwrap();
        assert_eq!(table.glyph_count(), 1);
        assert!(table.glyph(65).is_some());
    }

    #[test]
    fn test_malformed_numeric_field_errors() {
        let text = "\
info face=\"Test\"
common lineHeight=32
page id=0 file=\"t.png\"
char id=65 x=abc y=0 width=1 height=1 xoffset=0 yoffset=0 xadvance=1
";
        let err = parse(text, 255).unwrap_err();
        assert!(matches!(
            err,
            FontError::InvalidField {
                line: "char",
                field: "x",
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_glyph_line_errors() {
        let text = "\
info face=\"Test\"
common lineHeight=32
page id=0 file=\"t.png\"
char id=65 x=0 y=0
";
        let err = parse(text, 255).unwrap_err();
        assert!(matches!(
            err,
            FontError::TruncatedLine {
                line: "char",
                field: "width",
            }
        ));
    }

    #[test]
    fn test_blank_lines_and_unknown_lines_ignored() {
        let text = "\
info face=\"Test\"

common lineHeight=32
page id=0 file=\"t.png\"

unknown directive
char id=65 x=0 y=0 width=20 height=24 xoffset=1 yoffset=2 xadvance=22
";
        let table = parse(text, 255).unwrap();
        assert_eq!(table.glyph_count(), 1);
    }
}
