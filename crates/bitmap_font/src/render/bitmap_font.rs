//! Bitmap font engine with display caching
//!
//! Owns the glyph table and the atlas surface, and memoizes the per-glyph
//! walk for each (text, tint) pair as a replayable draw batch. Repeated
//! draws of unchanged content replay the captured batch at the new origin
//! instead of re-walking the string.

use std::collections::HashMap;

use super::surface::{AtlasRegion, AtlasSurface, BatchToken};
use crate::config::BitmapFontConfig;
use crate::font::{FontResult, GlyphDescriptor, GlyphTable, TextLayout};
use crate::foundation::math::{self, Color, Vec2};

/// Number of cached display entries that triggers a full cache flush
pub const DEFAULT_CACHE_CAPACITY: usize = 255;

/// Style fingerprint used when no tint is supplied
const IDENTITY_STYLE: u32 = 1;

/// Cache key: exact text content plus a style fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DisplayKey {
    text: String,
    style: u32,
}

/// A cached draw batch plus memoized metrics for one (text, style) pair
#[derive(Debug)]
struct Display {
    token: Option<BatchToken>,
    width: i32,
    height: i32,
    text: String,
}

/// Bitmap font rendering engine
///
/// Built once from descriptor text and an atlas surface; the glyph table
/// is immutable afterwards. Draws, metric queries, and the display cache
/// all run synchronously on the caller's thread.
///
/// # Example
///
/// ```no_run
/// use bitmap_font::render::{BatchRecorder, BitmapFont};
///
/// let descriptor = std::fs::read_to_string("resources/fonts/hud.fnt")?;
/// let mut font = BitmapFont::new(&descriptor, BatchRecorder::new())?;
///
/// font.draw_string(16.0, 16.0, "SCORE 0042");
/// for token in font.surface_mut().drain_submitted() {
///     // upload the batch's quads to the GPU
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BitmapFont<S: AtlasSurface> {
    surface: S,
    table: GlyphTable,
    displays: HashMap<DisplayKey, Display>,
    cache_capacity: usize,
    closed: bool,
}

impl<S: AtlasSurface> BitmapFont<S> {
    /// Build an engine from descriptor text with the default limits
    ///
    /// Fails with a [`crate::font::FontError`] on a malformed descriptor.
    pub fn new(descriptor: &str, surface: S) -> FontResult<Self> {
        Self::with_config(descriptor, surface, &BitmapFontConfig::default())
    }

    /// Build an engine with explicit limits
    pub fn with_config(
        descriptor: &str,
        surface: S,
        config: &BitmapFontConfig,
    ) -> FontResult<Self> {
        let table = GlyphTable::from_descriptor_with_max(descriptor, config.max_glyph_id)?;
        log::debug!(
            "bitmap font ready: {} glyphs, line height {}, cache capacity {}",
            table.glyph_count(),
            table.line_height(),
            config.cache_capacity
        );
        Ok(Self {
            surface,
            table,
            displays: HashMap::new(),
            cache_capacity: config.cache_capacity,
            closed: false,
        })
    }

    /// The glyph table backing this engine
    pub fn table(&self) -> &GlyphTable {
        &self.table
    }

    /// The atlas surface owned by this engine
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the atlas surface, e.g. to drain submissions
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Draw `text` with the glyphs' own atlas colors
    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        self.draw_string_tinted(x, y, text, None);
    }

    /// Draw `text`, optionally tinted
    pub fn draw_string_tinted(&mut self, x: f32, y: f32, text: &str, color: Option<Color>) {
        let end = text.chars().count().saturating_sub(1);
        self.draw_string_range(x, y, text, color, 0, end);
    }

    /// Draw `text`, emitting only the characters at indices in
    /// `[start, end]`
    ///
    /// Characters outside the range still advance the pen but emit no
    /// primitives, so a growing range reveals the string progressively
    /// without shifting the glyphs already shown.
    pub fn draw_string_range(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        color: Option<Color>,
        start: usize,
        end: usize,
    ) {
        if self.closed {
            return;
        }

        if self.displays.len() > self.cache_capacity {
            log::debug!(
                "display cache exceeded {} entries, flushing",
                self.cache_capacity
            );
            self.flush_cache();
        }

        let key = DisplayKey {
            text: text.to_owned(),
            style: style_fingerprint(color),
        };

        if let Some(display) = self.displays.get(&key) {
            if let Some(token) = display.token {
                self.surface.replay(token, Vec2::new(x, y));
                return;
            }
        }

        self.surface.begin(Vec2::new(x, y));
        if let Some(tint) = color {
            self.surface.set_tint(tint);
        }

        let table = &self.table;
        let line_height = table.line_height();
        let mut pen_x: i32 = 0;
        let mut pen_y: i32 = 0;
        let mut last: Option<&GlyphDescriptor> = None;

        for (index, ch) in text.chars().enumerate() {
            if ch == '\n' {
                pen_x = 0;
                pen_y += line_height;
                continue;
            }
            let glyph = match table.glyph(u32::from(ch)) {
                Some(glyph) => glyph,
                None => continue,
            };
            if let Some(prev) = last {
                pen_x += prev.kerning_offset(u32::from(ch));
            }
            last = Some(glyph);

            if index >= start && index <= end {
                self.surface.draw_region(
                    AtlasRegion {
                        x: glyph.atlas_x,
                        y: glyph.atlas_y,
                        width: glyph.width,
                        height: glyph.height,
                    },
                    Vec2::new(
                        (pen_x + i32::from(glyph.x_offset)) as f32,
                        (pen_y + i32::from(glyph.y_offset)) as f32,
                    ),
                );
            }

            pen_x += i32::from(glyph.advance);
        }

        if color.is_some() {
            self.surface.set_tint(math::white());
        }

        let token = self.surface.end();
        self.displays.insert(
            key,
            Display {
                token: Some(token),
                width: 0,
                height: 0,
                text: text.to_owned(),
            },
        );
    }

    /// Pixel width of `text`
    ///
    /// Satisfied from a cached display with matching text when already
    /// computed; otherwise measured and written back into a matching
    /// cache entry when one exists.
    pub fn width(&mut self, text: &str) -> i32 {
        if self.closed {
            return 0;
        }
        if let Some(display) = self.displays.values().find(|d| d.text == text) {
            if display.width != 0 {
                return display.width;
            }
        }
        let width = TextLayout::new(&self.table).width(text);
        if let Some(display) = self.displays.values_mut().find(|d| d.text == text) {
            display.width = width;
        }
        width
    }

    /// Pixel height of `text`
    ///
    /// Cached on demand like [`width`](Self::width).
    pub fn height(&mut self, text: &str) -> i32 {
        if self.closed {
            return 0;
        }
        if let Some(display) = self.displays.values().find(|d| d.text == text) {
            if display.height != 0 {
                return display.height;
            }
        }
        let height = TextLayout::new(&self.table).height(text);
        if let Some(display) = self.displays.values_mut().find(|d| d.text == text) {
            display.height = height;
        }
        height
    }

    /// Vertical distance between baselines of consecutive lines
    pub fn line_height(&self) -> i32 {
        if self.closed {
            return 0;
        }
        self.table.line_height()
    }

    /// Verbatim `info` header line from the descriptor
    pub fn info(&self) -> &str {
        if self.closed {
            return "";
        }
        self.table.info()
    }

    /// Verbatim `common` header line from the descriptor
    pub fn common(&self) -> &str {
        if self.closed {
            return "";
        }
        self.table.common()
    }

    /// Verbatim `page` header line from the descriptor
    pub fn page(&self) -> &str {
        if self.closed {
            return "";
        }
        self.table.page()
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release every cached batch and the atlas surface
    ///
    /// Idempotent; all operations after the first close are no-ops and
    /// queries return degenerate results.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.flush_cache();
        self.surface.close();
        log::debug!("bitmap font closed");
    }

    fn flush_cache(&mut self) {
        for display in self.displays.values_mut() {
            if let Some(token) = display.token.take() {
                self.surface.release(token);
            }
        }
        self.displays.clear();
    }
}

/// Deterministic fingerprint of the draw tint
///
/// Folds the four color components' bit patterns; identical colors always
/// collide and distinct colors practically never do. Untinted draws share
/// a fixed sentinel.
fn style_fingerprint(color: Option<Color>) -> u32 {
    match color {
        None => IDENTITY_STYLE,
        Some(c) => [c.x, c.y, c.z, c.w]
            .iter()
            .fold(IDENTITY_STYLE, |hash, component| {
                hash.wrapping_mul(31).wrapping_add(component.to_bits())
            }),
    }
}
