//! Pixels Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in pixels_operations.rs

use crate::color::Color;

/// Raw pixel data, row-major, one packed `0xAABBGGRR` color per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct PixelsData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}
