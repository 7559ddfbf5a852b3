//! Atlas surface abstraction
//!
//! Defines the interface between the font engine and the host's drawable
//! glyph atlas. Keeps the engine independent of any particular graphics
//! backend; the atlas itself is opaque and addressed only by pixel
//! rectangles.

use crate::foundation::math::{Vec2, Vec4};

slotmap::new_key_type! {
    /// Handle to a captured draw batch owned by a surface
    pub struct BatchToken;
}

/// Pixel-space rectangle addressing a region of the glyph atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasRegion {
    /// Left edge in atlas pixels
    pub x: u16,
    /// Top edge in atlas pixels
    pub y: u16,
    /// Region width in pixels
    pub width: u16,
    /// Region height in pixels
    pub height: u16,
}

/// Backend-agnostic drawable surface over the glyph atlas
///
/// Draw calls between [`begin`](Self::begin) and [`end`](Self::end) are
/// captured into a replayable batch; `end` submits the batch and returns
/// its token. [`replay`](Self::replay) resubmits a captured batch at a new
/// origin without re-recording. Destination positions are relative to the
/// batch origin.
pub trait AtlasSurface {
    /// Start capturing a batch anchored at `origin`
    fn begin(&mut self, origin: Vec2);

    /// Set the tint applied to subsequently recorded primitives
    fn set_tint(&mut self, tint: Vec4);

    /// Record one primitive copying `src` from the atlas to `dst`
    fn draw_region(&mut self, src: AtlasRegion, dst: Vec2);

    /// Finish capturing, submit the batch, and return its token
    fn end(&mut self) -> BatchToken;

    /// Resubmit a captured batch translated to `origin`
    fn replay(&mut self, token: BatchToken, origin: Vec2);

    /// Release a captured batch
    fn release(&mut self, token: BatchToken);

    /// Release the surface and every captured batch
    fn close(&mut self);
}
