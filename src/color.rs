//! Packed colors
//!
//! Colors are 32-bit values laid out as `0xAABBGGRR`: alpha in the high byte,
//! then blue, green, and red in the low byte. On little-endian targets the
//! in-memory byte order is therefore R, G, B, A, which is what the device
//! expects for both tints and pixel uploads.

use crate::math::clamp255;

pub type Color = u32;

pub const BLACK: Color = 0xff00_0000;
pub const WHITE: Color = 0xffff_ffff;
pub const RED: Color = 0xff00_00ff;
pub const GREEN: Color = 0xff00_ff00;
pub const BLUE: Color = 0xffff_0000;
pub const TRANSPARENT: Color = 0x0000_0000;

/// Maximum red and blue; traditionally stands in for "transparent" in
/// images without an alpha channel.
pub const MAGIC_PINK: Color = 0xffff_00ff;

/// Build a color from channel values in `[0, 1]`
pub fn make_color(r: f32, g: f32, b: f32, a: f32) -> Color {
    pack(
        clamp255((r * 255.0) as i32),
        clamp255((g * 255.0) as i32),
        clamp255((b * 255.0) as i32),
        clamp255((a * 255.0) as i32),
    )
}

/// Build a color from channel values in `[0, 255]`; out-of-range values clamp
pub fn make_color_u8(r: i32, g: i32, b: i32, a: i32) -> Color {
    pack(clamp255(r), clamp255(g), clamp255(b), clamp255(a))
}

fn pack(r: u8, g: u8, b: u8, a: u8) -> Color {
    (a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32
}

pub fn red(c: Color) -> u8 {
    (c & 0xff) as u8
}

pub fn green(c: Color) -> u8 {
    ((c >> 8) & 0xff) as u8
}

pub fn blue(c: Color) -> u8 {
    ((c >> 16) & 0xff) as u8
}

pub fn alpha(c: Color) -> u8 {
    ((c >> 24) & 0xff) as u8
}

/// Replace just the red channel
pub fn replace_red(c: Color, value: i32) -> Color {
    pack(clamp255(value), green(c), blue(c), alpha(c))
}

/// Replace just the green channel
pub fn replace_green(c: Color, value: i32) -> Color {
    pack(red(c), clamp255(value), blue(c), alpha(c))
}

/// Replace just the blue channel
pub fn replace_blue(c: Color, value: i32) -> Color {
    pack(red(c), green(c), clamp255(value), alpha(c))
}

/// Replace just the alpha channel
pub fn replace_alpha(c: Color, value: i32) -> Color {
    pack(red(c), green(c), blue(c), clamp255(value))
}

/// Unpack into normalized `[r, g, b, a]`, e.g. for a clear color
pub fn to_rgba_f32(c: Color) -> [f32; 4] {
    [
        red(c) as f32 / 255.0,
        green(c) as f32 / 255.0,
        blue(c) as f32 / 255.0,
        alpha(c) as f32 / 255.0,
    ]
}

/// Convert from the `[r, g, b, a]` byte order used by decoded images
pub fn from_rgba_bytes(px: [u8; 4]) -> Color {
    pack(px[0], px[1], px[2], px[3])
}
