//! Batched glyph rendering
//!
//! The atlas surface seam, draw batch recording, and the bitmap font
//! engine with its display cache.

pub mod batch;
pub mod bitmap_font;
pub mod surface;

pub use batch::{BatchRecorder, DrawBatch, GlyphQuad};
pub use bitmap_font::{BitmapFont, DEFAULT_CACHE_CAPACITY};
pub use surface::{AtlasRegion, AtlasSurface, BatchToken};
