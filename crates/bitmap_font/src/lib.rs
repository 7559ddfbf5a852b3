//! # Bitmap Font
//!
//! An AngelCode "BMFont" bitmap text rendering engine.
//!
//! ## Features
//!
//! - **Descriptor Parsing**: Line-oriented BMFont text descriptors with
//!   positional fields
//! - **Glyph Tables**: Dense id-indexed storage with binary-searched
//!   kerning pairs
//! - **Layout Metrics**: Boundary-accurate width and multiline height
//!   queries
//! - **Batched Rendering**: Per-glyph draw calls captured once and
//!   replayed from a content-keyed display cache
//! - **Backend Agnostic**: Hosts implement one surface trait over their
//!   own atlas texture
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitmap_font::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     bitmap_font::foundation::logging::init();
//!
//!     let descriptor = std::fs::read_to_string("resources/fonts/hud.fnt")?;
//!     let mut font = BitmapFont::new(&descriptor, BatchRecorder::new())?;
//!
//!     let caption = "READY";
//!     let x = (640 - font.width(caption)) as f32 / 2.0;
//!     font.draw_string(x, 32.0, caption);
//!
//!     for token in font.surface_mut().drain_submitted() {
//!         // translate the batch's quads into backend draw calls
//!     }
//!
//!     font.close();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod font;
pub mod foundation;
pub mod render;

pub use config::{BitmapFontConfig, ConfigError};
pub use font::{
    FontError, FontResult, GlyphDescriptor, GlyphTable, KerningPair, TextLayout,
    DEFAULT_MAX_GLYPH_ID,
};
pub use render::{
    AtlasRegion, AtlasSurface, BatchRecorder, BatchToken, BitmapFont, DrawBatch, GlyphQuad,
    DEFAULT_CACHE_CAPACITY,
};

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::BitmapFontConfig;
    pub use crate::font::{FontError, FontResult, GlyphTable, TextLayout};
    pub use crate::foundation::math::{Color, Vec2, Vec4};
    pub use crate::render::{AtlasSurface, BatchRecorder, BitmapFont};
}
