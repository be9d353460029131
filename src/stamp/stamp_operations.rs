//! Stamp Operations - Pure DOP Functions
//!
//! All functions that transform StampData live here.

use glam::Vec2;

use super::stamp_data::StampData;
use crate::batch;
use crate::color::{self, Color};
use crate::frame::DrawContext;
use crate::math::{wrap_pi, wrap_rad};
use crate::texture::Texture;

/// Stamp covering the whole texture, pinned at its top-left corner
pub fn create_stamp(texture: &Texture) -> StampData {
    create_region_stamp(
        texture,
        0.0,
        0.0,
        texture.width as f32,
        texture.height as f32,
    )
}

/// Stamp covering a pixel rectangle of the texture
pub fn create_region_stamp(texture: &Texture, x: f32, y: f32, w: f32, h: f32) -> StampData {
    let tw = texture.width as f32;
    let th = texture.height as f32;
    StampData {
        texture: texture.clone(),
        u0: x / tw,
        v0: y / th,
        u1: (x + w) / tw,
        v1: (y + h) / th,
        pin: Vec2::ZERO,
        orig_size: Vec2::new(w, h),
        size: Vec2::new(w, h),
        position: Vec2::ZERO,
        angle: 0.0,
        color: color::WHITE,
        flipped_x: false,
        flipped_y: false,
    }
}

/// Set the current size to the original size times `(sx, sy)`.
///
/// Zero or negative factors are accepted and produce degenerate or mirrored
/// quads; use the flip operations to mirror.
pub fn rescale(stamp: &mut StampData, sx: f32, sy: f32) {
    stamp.size = stamp.orig_size * Vec2::new(sx, sy);
}

pub fn rescale_uniform(stamp: &mut StampData, s: f32) {
    rescale(stamp, s, s);
}

/// Set the current size in pixels, regardless of the original size
pub fn resize(stamp: &mut StampData, w: f32, h: f32) {
    stamp.size = Vec2::new(w, h);
}

pub fn recolor(stamp: &mut StampData, c: Color) {
    stamp.color = c;
}

/// Set the tint from channel values in `[0, 1]`
pub fn recolor_rgba(stamp: &mut StampData, r: f32, g: f32, b: f32, a: f32) {
    stamp.color = color::make_color(r, g, b, a);
}

/// Change only the alpha of the tint (`0.0` transparent, `1.0` opaque)
pub fn set_alpha(stamp: &mut StampData, a: f32) {
    stamp.color = color::replace_alpha(stamp.color, (a * 255.0) as i32);
}

pub fn move_to(stamp: &mut StampData, x: f32, y: f32) {
    stamp.position = Vec2::new(x, y);
}

pub fn move_relative(stamp: &mut StampData, dx: f32, dy: f32) {
    stamp.position += Vec2::new(dx, dy);
}

/// Set the absolute rotation in radians
pub fn rotate(stamp: &mut StampData, angle: f32) {
    stamp.angle = angle;
}

pub fn rotate_relative(stamp: &mut StampData, delta: f32) {
    stamp.angle += delta;
}

/// Normalize the angle into `[0, 2π)`
pub fn fix_angle(stamp: &mut StampData) {
    stamp.angle = wrap_rad(stamp.angle);
}

/// Normalize the angle into `(-π, π]`
pub fn fix_angle_n(stamp: &mut StampData) {
    stamp.angle = wrap_pi(stamp.angle);
}

pub fn center_pin(stamp: &mut StampData) {
    stamp.pin = Vec2::splat(0.5);
}

/// Place the pin at pixel coordinates within the stamp.
///
/// The pin is stored as a fraction of the current size, so call this after
/// `resize`/`rescale`; resizing afterwards moves the pin with the image.
pub fn move_pin_to(stamp: &mut StampData, px: f32, py: f32) {
    stamp.pin = Vec2::new(px, py) / stamp.size;
}

pub fn flip_x(stamp: &mut StampData) {
    std::mem::swap(&mut stamp.u0, &mut stamp.u1);
    stamp.flipped_x = !stamp.flipped_x;
}

pub fn flip_y(stamp: &mut StampData) {
    std::mem::swap(&mut stamp.v0, &mut stamp.v1);
    stamp.flipped_y = !stamp.flipped_y;
}

/// Toggle the selected axes
pub fn flip(stamp: &mut StampData, x: bool, y: bool) {
    if x {
        flip_x(stamp);
    }
    if y {
        flip_y(stamp);
    }
}

/// Flip along X only if the current state differs from `flipped`
pub fn set_flip_x(stamp: &mut StampData, flipped: bool) {
    if stamp.flipped_x != flipped {
        flip_x(stamp);
    }
}

pub fn set_flip_y(stamp: &mut StampData, flipped: bool) {
    if stamp.flipped_y != flipped {
        flip_y(stamp);
    }
}

pub fn set_flip(stamp: &mut StampData, x: bool, y: bool) {
    set_flip_x(stamp, x);
    set_flip_y(stamp, y);
}

/// Whether the stamp is currently mirrored along X
pub fn flipped_x(stamp: &StampData) -> bool {
    stamp.flipped_x
}

pub fn flipped_y(stamp: &StampData) -> bool {
    stamp.flipped_y
}

/// Draw the stamp at its current position
pub fn stamp(stamp: &StampData, ctx: &mut DrawContext<'_>) {
    stamp_at(stamp, ctx, stamp.position.x, stamp.position.y);
}

/// Draw the stamp at `(x, y)` without moving it
pub fn stamp_at(stamp: &StampData, ctx: &mut DrawContext<'_>, x: f32, y: f32) {
    batch::submit(ctx.batch, &mut *ctx.device, stamp, x, y);
}
