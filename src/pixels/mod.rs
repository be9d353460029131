//! Pixels Module - CPU-side image data
//!
//! Pixel buffers are what gets uploaded to the device when a texture is
//! created. They can be loaded from image files, edited (color keying), and
//! rescaled to fit device limits.

pub mod pixels_data;
pub mod pixels_operations;

pub use pixels_data::PixelsData;
pub use pixels_operations::{
    create_pixels, from_raw, from_rgba_image, get_pixel, load_pixels, replace_color, resized,
    set_pixel, to_rgba_bytes,
};
