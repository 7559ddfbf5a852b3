//! Draw batch recording and replay

use slotmap::SlotMap;

use super::surface::{AtlasRegion, AtlasSurface, BatchToken};
use crate::foundation::math::{self, Vec2, Vec4};

/// One glyph primitive: an atlas source region, a destination offset
/// relative to the batch origin, and the tint captured at record time
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Source rectangle in the atlas
    pub src: AtlasRegion,
    /// Destination offset relative to the batch origin
    pub dst: [f32; 2],
    /// RGBA tint
    pub tint: [f32; 4],
}

/// A replayable sequence of glyph primitives captured from one walk
#[derive(Debug, Clone)]
pub struct DrawBatch {
    origin: Vec2,
    quads: Vec<GlyphQuad>,
}

impl DrawBatch {
    fn new(origin: Vec2) -> Self {
        Self {
            origin,
            quads: Vec::new(),
        }
    }

    /// Current batch origin in surface coordinates
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Recorded primitives, in emission order
    pub fn quads(&self) -> &[GlyphQuad] {
        &self.quads
    }
}

/// Records glyph draw calls into replayable batches
///
/// The crate's concrete [`AtlasSurface`]: primitives are captured into
/// [`DrawBatch`] values held in a slot map, and every submission queues
/// its token. The host drains the queue once per frame and translates
/// each batch into backend draw calls against its own atlas texture.
#[derive(Debug)]
pub struct BatchRecorder {
    batches: SlotMap<BatchToken, DrawBatch>,
    pending: Option<DrawBatch>,
    tint: Vec4,
    submitted: Vec<BatchToken>,
    closed: bool,
}

impl BatchRecorder {
    /// Create an empty recorder with the identity tint
    pub fn new() -> Self {
        Self {
            batches: SlotMap::with_key(),
            pending: None,
            tint: math::white(),
            submitted: Vec::new(),
            closed: false,
        }
    }

    /// Look up a captured batch
    pub fn batch(&self, token: BatchToken) -> Option<&DrawBatch> {
        self.batches.get(token)
    }

    /// Number of captured batches currently held
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Take the tokens submitted since the last drain, in submission order
    pub fn drain_submitted(&mut self) -> Vec<BatchToken> {
        std::mem::take(&mut self.submitted)
    }

    /// Current tint state
    pub fn tint(&self) -> Vec4 {
        self.tint
    }

    /// Whether the recorder has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for BatchRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasSurface for BatchRecorder {
    fn begin(&mut self, origin: Vec2) {
        if self.closed {
            return;
        }
        self.pending = Some(DrawBatch::new(origin));
    }

    fn set_tint(&mut self, tint: Vec4) {
        self.tint = tint;
    }

    fn draw_region(&mut self, src: AtlasRegion, dst: Vec2) {
        if self.closed {
            return;
        }
        let tint = self.tint;
        if let Some(batch) = self.pending.as_mut() {
            batch.quads.push(GlyphQuad {
                src,
                dst: [dst.x, dst.y],
                tint: [tint.x, tint.y, tint.z, tint.w],
            });
        }
    }

    fn end(&mut self) -> BatchToken {
        if self.closed {
            // Null token; replay and release ignore it.
            return BatchToken::default();
        }
        let batch = self
            .pending
            .take()
            .unwrap_or_else(|| DrawBatch::new(Vec2::zeros()));
        let token = self.batches.insert(batch);
        self.submitted.push(token);
        token
    }

    fn replay(&mut self, token: BatchToken, origin: Vec2) {
        if self.closed {
            return;
        }
        if let Some(batch) = self.batches.get_mut(token) {
            batch.origin = origin;
            self.submitted.push(token);
        }
    }

    fn release(&mut self, token: BatchToken) {
        self.batches.remove(token);
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.pending = None;
        self.submitted.clear();
        let released = self.batches.len();
        self.batches.clear();
        log::debug!("atlas surface closed, released {released} batch(es)");
    }
}
