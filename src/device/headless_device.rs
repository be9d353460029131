//! Headless device - records calls instead of drawing

use super::render_device::{BatchView, RenderDevice, TextureDescriptor};
use crate::color::Color;
use crate::constants::DEFAULT_MAX_TEXTURE_SIZE;
use crate::error::{EngineError, EngineResult};
use crate::texture::{DeviceTextureHandle, TextureData, TextureId};

/// Owned copy of one `draw_batch` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBatch {
    pub item_count: usize,
    pub texture_count: usize,
    pub geometry: Vec<f32>,
    pub uvs: Vec<f32>,
    pub texture_slots: Vec<u8>,
    pub tints: Vec<Color>,
}

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateTexture {
        handle: DeviceTextureHandle,
        width: u32,
        height: u32,
    },
    ActivateTexture {
        slot: u8,
        texture: TextureId,
    },
    DrawBatch(RecordedBatch),
    Clear(Color),
}

/// A `RenderDevice` that keeps a log of everything asked of it
#[derive(Debug)]
pub struct HeadlessDevice {
    pub calls: Vec<DeviceCall>,
    pub max_texture_size: u32,
    /// Upload sizes larger than this make `create_texture` fail
    pub fail_uploads_over: Option<u32>,
    next_handle: u64,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
            fail_uploads_over: None,
            next_handle: 1,
        }
    }

    pub fn with_max_texture_size(max_texture_size: u32) -> Self {
        Self {
            max_texture_size,
            ..Self::new()
        }
    }

    /// All recorded `draw_batch` calls, in order
    pub fn draws(&self) -> Vec<&RecordedBatch> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::DrawBatch(batch) => Some(batch),
                _ => None,
            })
            .collect()
    }

    /// All recorded `(slot, texture)` activations, in order
    pub fn activations(&self) -> Vec<(u8, TextureId)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::ActivateTexture { slot, texture } => Some((*slot, *texture)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::Clear(_)))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl RenderDevice for HeadlessDevice {
    fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    fn create_texture(
        &mut self,
        descriptor: &TextureDescriptor,
        pixels: &[Color],
    ) -> EngineResult<DeviceTextureHandle> {
        let expected = descriptor.width as usize * descriptor.height as usize;
        if pixels.len() != expected {
            return Err(EngineError::DeviceError {
                operation: "create_texture".to_string(),
                error: format!("expected {} pixels, got {}", expected, pixels.len()),
            });
        }
        if let Some(limit) = self.fail_uploads_over {
            if descriptor.width > limit || descriptor.height > limit {
                return Err(EngineError::DeviceError {
                    operation: "create_texture".to_string(),
                    error: format!(
                        "{}x{} exceeds upload limit {}",
                        descriptor.width, descriptor.height, limit
                    ),
                });
            }
        }

        let handle = DeviceTextureHandle(self.next_handle);
        self.next_handle += 1;
        self.calls.push(DeviceCall::CreateTexture {
            handle,
            width: descriptor.width,
            height: descriptor.height,
        });
        Ok(handle)
    }

    fn activate_texture(&mut self, slot: u8, texture: &TextureData) {
        self.calls.push(DeviceCall::ActivateTexture {
            slot,
            texture: texture.id,
        });
    }

    fn draw_batch(&mut self, batch: &BatchView<'_>) {
        self.calls.push(DeviceCall::DrawBatch(RecordedBatch {
            item_count: batch.item_count,
            texture_count: batch.texture_count,
            geometry: batch.geometry.to_vec(),
            uvs: batch.uvs.to_vec(),
            texture_slots: batch.texture_slots.to_vec(),
            tints: batch.tints.to_vec(),
        }));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DeviceCall::Clear(color));
    }
}
