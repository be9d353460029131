//! Stamp Module
//!
//! A stamp is a drawable view onto a region of a texture: a UV rect plus a
//! pin (anchor), size, position, rotation, flips and tint. Stamps are plain
//! data; drawing one copies a snapshot of its transform into the active
//! batch.

pub mod stamp_data;
pub mod stamp_operations;

pub use stamp_data::StampData;
pub use stamp_operations::{
    center_pin, create_region_stamp, create_stamp, fix_angle, fix_angle_n, flip, flip_x, flip_y,
    flipped_x, flipped_y, move_pin_to, move_relative, move_to, recolor, recolor_rgba, rescale,
    rescale_uniform, resize, rotate, rotate_relative, set_alpha, set_flip, set_flip_x, set_flip_y,
    stamp, stamp_at,
};
