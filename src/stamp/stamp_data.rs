//! Stamp Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in stamp_operations.rs

use glam::Vec2;

use crate::color::Color;
use crate::texture::Texture;

/// A positioned, transformed, tinted view of a texture region
#[derive(Debug, Clone, PartialEq)]
pub struct StampData {
    /// Texture the stamp samples from. Shared with every other stamp cut
    /// from the same image.
    pub texture: Texture,

    /// Texture coordinates, normalized to [0, 1]. Flipping swaps the pairs.
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,

    /// Anchor as a fraction of the current size; (0.5, 0.5) is the center.
    /// Position and rotation are applied about this point.
    pub pin: Vec2,

    /// Size of the region when the stamp was created
    pub orig_size: Vec2,

    /// Current drawn size in pixels
    pub size: Vec2,

    pub position: Vec2,

    /// Rotation in radians
    pub angle: f32,

    /// Tint, multiplied against the texture color
    pub color: Color,

    pub flipped_x: bool,
    pub flipped_y: bool,
}
