//! Batch Operations - Pure DOP Functions
//!
//! The batch moves between three states: empty, accumulating, and (inside
//! `flush`) flushing, which always ends empty again.

use rustc_hash::FxHashMap;

use super::batch_data::{BatchData, BatchStats};
use crate::constants::{GEOMETRY_STRIDE, MAX_ITEMS, MAX_TEXTURES, MAX_TEXTURE_UNITS, UV_STRIDE};
use crate::device::{BatchView, RenderDevice};
use crate::error::{EngineError, EngineResult};
use crate::stamp::StampData;
use crate::texture::TextureData;

/// Create an empty batch with the given capacities
pub fn create_batch(max_items: usize, max_textures: usize) -> EngineResult<BatchData> {
    if max_items == 0 {
        return Err(EngineError::InvalidArgument {
            name: "max_items".to_string(),
            reason: "a batch must hold at least one item".to_string(),
        });
    }
    if max_textures == 0 || max_textures > MAX_TEXTURE_UNITS {
        return Err(EngineError::InvalidArgument {
            name: "max_textures".to_string(),
            reason: format!("must be between 1 and {}", MAX_TEXTURE_UNITS),
        });
    }

    Ok(allocate(max_items, max_textures))
}

/// Batch with the standard 512 item / 6 texture capacities
pub fn create_default_batch() -> BatchData {
    allocate(MAX_ITEMS, MAX_TEXTURES)
}

fn allocate(max_items: usize, max_textures: usize) -> BatchData {
    BatchData {
        max_items,
        max_textures,
        item_count: 0,
        geometry: vec![0.0; max_items * GEOMETRY_STRIDE],
        uvs: vec![0.0; max_items * UV_STRIDE],
        texture_slots: vec![0; max_items],
        tints: vec![0; max_items],
        bound_textures: Vec::with_capacity(max_textures),
        slot_lookup: FxHashMap::default(),
        stats: BatchStats::default(),
    }
}

pub fn is_empty(batch: &BatchData) -> bool {
    batch.item_count == 0
}

pub fn item_count(batch: &BatchData) -> usize {
    batch.item_count
}

pub fn texture_count(batch: &BatchData) -> usize {
    batch.bound_textures.len()
}

/// Slot the texture is bound to in the current batch, if any
pub fn slot_of(batch: &BatchData, texture: &TextureData) -> Option<u8> {
    batch.slot_lookup.get(&texture.id).copied()
}

/// Read-only view of the live items
pub fn view(batch: &BatchData) -> BatchView<'_> {
    let n = batch.item_count;
    BatchView {
        item_count: n,
        texture_count: batch.bound_textures.len(),
        geometry: &batch.geometry[..n * GEOMETRY_STRIDE],
        uvs: &batch.uvs[..n * UV_STRIDE],
        texture_slots: &batch.texture_slots[..n],
        tints: &batch.tints[..n],
    }
}

/// Record one stamp at `(x, y)`.
///
/// Never fails: a full item table or a full texture table flushes the
/// batch first, so the new item always fits.
pub fn submit(
    batch: &mut BatchData,
    device: &mut dyn RenderDevice,
    stamp: &StampData,
    x: f32,
    y: f32,
) {
    if batch.item_count == batch.max_items {
        implicit_flush(batch, device);
    }

    let slot = match slot_of(batch, &stamp.texture) {
        Some(slot) => slot,
        None => {
            if batch.bound_textures.len() >= batch.max_textures {
                implicit_flush(batch, device);
            }
            bind(batch, stamp)
        }
    };

    let i = batch.item_count;
    let (sin, cos) = if stamp.angle == 0.0 {
        (0.0, 1.0)
    } else {
        stamp.angle.sin_cos()
    };

    let g = &mut batch.geometry[i * GEOMETRY_STRIDE..(i + 1) * GEOMETRY_STRIDE];
    g[0] = stamp.pin.x * stamp.size.x;
    g[1] = stamp.pin.y * stamp.size.y;
    g[2] = stamp.size.x;
    g[3] = stamp.size.y;
    g[4] = x;
    g[5] = y;
    g[6] = sin;
    g[7] = cos;

    let t = &mut batch.uvs[i * UV_STRIDE..(i + 1) * UV_STRIDE];
    t[0] = stamp.u0;
    t[1] = stamp.v0;
    t[2] = stamp.u1;
    t[3] = stamp.v1;

    batch.texture_slots[i] = slot;
    batch.tints[i] = stamp.color;
    batch.item_count += 1;
}

/// Hand the live items to the device and reset the batch.
///
/// Returns false (and touches nothing) when the batch is empty.
pub fn flush(batch: &mut BatchData, device: &mut dyn RenderDevice) -> bool {
    if batch.item_count == 0 {
        return false;
    }

    log::trace!(
        "[batch_operations::flush] Flushing {} items across {} textures",
        batch.item_count,
        batch.bound_textures.len()
    );

    for (slot, texture) in batch.bound_textures.iter().enumerate() {
        device.activate_texture(slot as u8, texture);
    }
    device.draw_batch(&view(batch));

    batch.stats.flushes += 1;
    batch.stats.items_flushed += batch.item_count as u64;
    batch.stats.texture_binds += batch.bound_textures.len() as u64;

    batch.item_count = 0;
    batch.bound_textures.clear();
    batch.slot_lookup.clear();
    true
}

fn implicit_flush(batch: &mut BatchData, device: &mut dyn RenderDevice) {
    if flush(batch, device) {
        batch.stats.implicit_flushes += 1;
    }
}

fn bind(batch: &mut BatchData, stamp: &StampData) -> u8 {
    let slot = batch.bound_textures.len() as u8;
    batch.bound_textures.push(stamp.texture.clone());
    batch.slot_lookup.insert(stamp.texture.id, slot);
    slot
}
