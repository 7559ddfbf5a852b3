//! Math utilities and types
//!
//! Provides the fundamental math types used by the font engine.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color with components in the 0.0-1.0 range
pub type Color = Vec4;

/// Opaque white, the identity tint
pub fn white() -> Color {
    Color::new(1.0, 1.0, 1.0, 1.0)
}
