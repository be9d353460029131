//! Render device interface consumed by the batch manager

use crate::color::Color;
use crate::constants::{DEFAULT_MAX_TEXTURE_SIZE, GEOMETRY_STRIDE, UV_STRIDE};
use crate::error::EngineResult;
use crate::texture::{DeviceTextureHandle, PixelFormat, TextureData, TextureSettings};

/// Everything the device needs to allocate a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub settings: TextureSettings,
}

/// Read-only view of the live portion of a batch, handed to `draw_batch`.
///
/// Per item `i`:
/// - `geometry[i*8..i*8+8]`: pin x/y in pixels, width, height, x, y, sin, cos
/// - `uvs[i*4..i*4+4]`: u0, v0, u1, v1
/// - `texture_slots[i]`: slot (`< texture_count`) the item samples from
/// - `tints[i]`: packed tint color
#[derive(Debug, Clone, Copy)]
pub struct BatchView<'a> {
    pub item_count: usize,
    pub texture_count: usize,
    pub geometry: &'a [f32],
    pub uvs: &'a [f32],
    pub texture_slots: &'a [u8],
    pub tints: &'a [Color],
}

impl<'a> BatchView<'a> {
    /// Geometry for one item
    pub fn item_geometry(&self, item: usize) -> &'a [f32] {
        &self.geometry[item * GEOMETRY_STRIDE..(item + 1) * GEOMETRY_STRIDE]
    }

    /// UV rect for one item
    pub fn item_uvs(&self, item: usize) -> &'a [f32] {
        &self.uvs[item * UV_STRIDE..(item + 1) * UV_STRIDE]
    }

    /// Geometry as raw bytes, ready for a vertex buffer upload
    pub fn geometry_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.geometry)
    }

    /// UVs as raw bytes
    pub fn uv_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.uvs)
    }

    /// Tints as raw bytes
    pub fn tint_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.tints)
    }
}

/// Graphics backend operations used by Stampwork.
///
/// Calls only ever come from the single thread driving frames.
pub trait RenderDevice {
    /// Largest texture edge the device accepts; larger images are downscaled
    fn max_texture_size(&self) -> u32 {
        DEFAULT_MAX_TEXTURE_SIZE
    }

    /// Allocate device memory for a texture and upload its pixels
    fn create_texture(
        &mut self,
        descriptor: &TextureDescriptor,
        pixels: &[Color],
    ) -> EngineResult<DeviceTextureHandle>;

    /// Bind `texture` to texture unit `slot` and apply its wrap and filter
    /// parameters
    fn activate_texture(&mut self, slot: u8, texture: &TextureData);

    /// Draw `batch.item_count` quads sampling from `batch.texture_count`
    /// bound texture units
    fn draw_batch(&mut self, batch: &BatchView<'_>);

    /// Clear the color buffer
    fn clear(&mut self, color: Color);
}
