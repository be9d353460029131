//! Pixels Operations - Pure DOP Functions

use std::path::Path;

use image::RgbaImage;

use super::pixels_data::PixelsData;
use crate::color::{self, Color};
use crate::error::{image_error, io_error, EngineError, EngineResult, OptionExt};

/// Create a fully transparent pixel buffer
pub fn create_pixels(width: u32, height: u32) -> PixelsData {
    PixelsData {
        width,
        height,
        pixels: vec![color::TRANSPARENT; width as usize * height as usize],
    }
}

/// Wrap existing pixel data, checking that the length matches the dimensions
pub fn from_raw(width: u32, height: u32, pixels: Vec<Color>) -> EngineResult<PixelsData> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(EngineError::InvalidArgument {
            name: "pixels".to_string(),
            reason: format!(
                "{} pixels supplied for a {}x{} image ({} expected)",
                pixels.len(),
                width,
                height,
                expected
            ),
        });
    }

    Ok(PixelsData {
        width,
        height,
        pixels,
    })
}

/// Convert a decoded RGBA image
pub fn from_rgba_image(image: &RgbaImage) -> PixelsData {
    PixelsData {
        width: image.width(),
        height: image.height(),
        pixels: image.pixels().map(|p| color::from_rgba_bytes(p.0)).collect(),
    }
}

/// Load and decode an image file (png, jpg, gif, bmp, ...)
pub fn load_pixels(path: &Path) -> EngineResult<PixelsData> {
    log::debug!("[pixels_operations::load_pixels] Loading {}", path.display());

    let image = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(error) => io_error(path, error),
        other => image_error(path, other),
    })?;
    Ok(from_rgba_image(&image.to_rgba8()))
}

/// Pixel data as R, G, B, A bytes
pub fn to_rgba_bytes(data: &PixelsData) -> Vec<u8> {
    data.pixels.iter().flat_map(|c| c.to_le_bytes()).collect()
}

/// Read one pixel; `None` outside the image
pub fn get_pixel(data: &PixelsData, x: u32, y: u32) -> Option<Color> {
    if x >= data.width || y >= data.height {
        return None;
    }
    data.pixels
        .get(y as usize * data.width as usize + x as usize)
        .copied()
}

/// Write one pixel; returns false (and writes nothing) outside the image
pub fn set_pixel(data: &mut PixelsData, x: u32, y: u32, c: Color) -> bool {
    if x >= data.width || y >= data.height {
        return false;
    }
    let index = y as usize * data.width as usize + x as usize;
    match data.pixels.get_mut(index) {
        Some(px) => {
            *px = c;
            true
        }
        None => false,
    }
}

/// Replace every pixel of exactly `from` with `to`, returning how many changed.
///
/// Typically used to turn a key color such as `color::MAGIC_PINK` into
/// transparency.
pub fn replace_color(data: &mut PixelsData, from: Color, to: Color) -> usize {
    if from == to {
        return 0;
    }

    let mut replaced = 0;
    for px in data.pixels.iter_mut().filter(|px| **px == from) {
        *px = to;
        replaced += 1;
    }
    replaced
}

/// Rescale to `width` x `height` with a triangle filter
pub fn resized(data: &PixelsData, width: u32, height: u32) -> EngineResult<PixelsData> {
    let source = RgbaImage::from_raw(data.width, data.height, to_rgba_bytes(data))
        .ok_or_engine(|| EngineError::Internal {
            message: format!(
                "pixel buffer does not match {}x{}",
                data.width, data.height
            ),
        })?;

    let scaled = image::imageops::resize(
        &source,
        width,
        height,
        image::imageops::FilterType::Triangle,
    );
    Ok(from_rgba_image(&scaled))
}
