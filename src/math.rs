//! Small numeric helpers used by the stamp transform model

use std::f32::consts::PI;

/// Wrap `v` into `[lo, hi)`.
///
/// Uses floor-division semantics so negative inputs land in range too:
/// `wrapf(-0.25, 0.0, 1.0) == 0.75`.
pub fn wrapf(v: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    let mut r = (v - lo).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if r >= span {
        r = 0.0;
    }
    r + lo
}

/// Wrap an integer into the inclusive range `[lo, hi]`
pub fn wrap_int(v: i32, lo: i32, hi: i32) -> i32 {
    (v - lo).rem_euclid(hi - lo + 1) + lo
}

/// Wrap into `[0, 1)`
pub fn wrap1(v: f32) -> f32 {
    wrapf(v, 0.0, 1.0)
}

/// Wrap an angle into `[0, 2π)`
pub fn wrap_rad(v: f32) -> f32 {
    wrapf(v, 0.0, 2.0 * PI)
}

/// Wrap an angle into `(-π, π]`
pub fn wrap_pi(v: f32) -> f32 {
    -wrapf(-v, -PI, PI)
}

/// Clamp into `[lo, hi]`
pub fn clamp(n: f32, lo: f32, hi: f32) -> f32 {
    if n < lo {
        lo
    } else if n > hi {
        hi
    } else {
        n
    }
}

/// Clamp into `[0, 1]`
pub fn clamp1(v: f32) -> f32 {
    clamp(v, 0.0, 1.0)
}

/// Clamp an integer channel value into `[0, 255]`
pub fn clamp255(n: i32) -> u8 {
    n.clamp(0, 255) as u8
}

/// Map `v` from `[0, 1]` onto `[a, b]` (not clamped)
pub fn scale(v: f32, a: f32, b: f32) -> f32 {
    a + v * (b - a)
}

/// Map `v` from `[a, b]` back onto `[0, 1]` (not clamped)
pub fn unscale(v: f32, a: f32, b: f32) -> f32 {
    (v - a) / (b - a)
}
