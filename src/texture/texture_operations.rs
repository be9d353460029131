//! Texture Operations - Pure DOP Functions

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::texture_data::{
    PixelFormat, Texture, TextureData, TextureId, TexturePadding, TextureSettings,
};
use crate::device::{RenderDevice, TextureDescriptor};
use crate::error::{EngineError, EngineResult};
use crate::pixels::{self, PixelsData};
use crate::stamp::{create_region_stamp, StampData};

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a fresh texture identity
pub fn next_texture_id() -> TextureId {
    TextureId(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed))
}

/// Upload pixel data to the device and wrap it as a shared texture.
///
/// Images larger than the device's maximum texture size are downscaled
/// (with a warning). The texture keeps the source dimensions for UV math.
pub fn create_texture(
    device: &mut dyn RenderDevice,
    source: &PixelsData,
    settings: TextureSettings,
) -> EngineResult<Texture> {
    let max_size = device.max_texture_size();

    let clamped;
    let upload = if source.width > max_size || source.height > max_size {
        let width = source.width.min(max_size);
        let height = source.height.min(max_size);
        log::warn!(
            "[texture_operations::create_texture] Texture size {}x{} is too large; rescaling to {}x{}",
            source.width,
            source.height,
            width,
            height
        );
        clamped = pixels::resized(source, width, height)?;
        &clamped
    } else {
        source
    };

    let descriptor = TextureDescriptor {
        width: upload.width,
        height: upload.height,
        format: PixelFormat::Rgba8888,
        settings,
    };
    let handle = device.create_texture(&descriptor, &upload.pixels)?;

    Ok(Arc::new(TextureData {
        id: next_texture_id(),
        width: source.width,
        height: source.height,
        device_width: upload.width,
        device_height: upload.height,
        format: descriptor.format,
        settings,
        handle,
    }))
}

/// Load an image file straight into a texture
pub fn load_texture(
    device: &mut dyn RenderDevice,
    path: &Path,
    settings: TextureSettings,
) -> EngineResult<Texture> {
    let source = pixels::load_pixels(path)?;
    let texture = create_texture(device, &source, settings)?;
    log::debug!(
        "[texture_operations::load_texture] Loaded {} ({}x{})",
        path.display(),
        texture.width,
        texture.height
    );
    Ok(texture)
}

/// Split a texture into `num_x` by `num_y` equally sized tiles.
///
/// Returns stamps indexed `[x][y]`. Padding is excluded from the tiled area;
/// leftover pixels that do not fill a whole tile are ignored.
pub fn split_into_tiles_2d(
    texture: &Texture,
    num_x: u32,
    num_y: u32,
    padding: TexturePadding,
) -> EngineResult<Vec<Vec<StampData>>> {
    require_nonzero("num_x", num_x)?;
    require_nonzero("num_y", num_y)?;

    let (w, h) = tiled_area(texture, padding);
    split_into_tiles_by_size_2d(texture, w / num_x, h / num_y, padding)
}

/// Split a texture into tiles of `size_x` by `size_y` pixels, indexed `[x][y]`
pub fn split_into_tiles_by_size_2d(
    texture: &Texture,
    size_x: u32,
    size_y: u32,
    padding: TexturePadding,
) -> EngineResult<Vec<Vec<StampData>>> {
    require_nonzero("size_x", size_x)?;
    require_nonzero("size_y", size_y)?;

    let (w, h) = tiled_area(texture, padding);
    let num_x = w / size_x;
    let num_y = h / size_y;

    let columns = (0..num_x)
        .map(|x| {
            (0..num_y)
                .map(|y| {
                    create_region_stamp(
                        texture,
                        (padding.left + x * size_x) as f32,
                        (padding.top + y * size_y) as f32,
                        size_x as f32,
                        size_y as f32,
                    )
                })
                .collect()
        })
        .collect();

    Ok(columns)
}

/// Same as `split_into_tiles_2d`, flattened row-major (`x + y * num_x`)
pub fn split_into_tiles(
    texture: &Texture,
    num_x: u32,
    num_y: u32,
    padding: TexturePadding,
) -> EngineResult<Vec<StampData>> {
    split_into_tiles_2d(texture, num_x, num_y, padding).map(flatten_row_major)
}

/// Same as `split_into_tiles_by_size_2d`, flattened row-major
pub fn split_into_tiles_by_size(
    texture: &Texture,
    size_x: u32,
    size_y: u32,
    padding: TexturePadding,
) -> EngineResult<Vec<StampData>> {
    split_into_tiles_by_size_2d(texture, size_x, size_y, padding).map(flatten_row_major)
}

fn tiled_area(texture: &TextureData, padding: TexturePadding) -> (u32, u32) {
    (
        texture
            .width
            .saturating_sub(padding.left)
            .saturating_sub(padding.right),
        texture
            .height
            .saturating_sub(padding.top)
            .saturating_sub(padding.bottom),
    )
}

fn flatten_row_major(columns: Vec<Vec<StampData>>) -> Vec<StampData> {
    let num_y = columns.first().map_or(0, Vec::len);
    let mut rows = Vec::with_capacity(columns.len() * num_y);
    for y in 0..num_y {
        for column in &columns {
            rows.push(column[y].clone());
        }
    }
    rows
}

fn require_nonzero(name: &str, value: u32) -> EngineResult<()> {
    if value == 0 {
        return Err(EngineError::InvalidArgument {
            name: name.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
