//! Batch Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in batch_operations.rs

use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::texture::{Texture, TextureId};

/// Struct-of-Arrays storage for the items of one batch.
///
/// Every array is allocated to full capacity up front; only the first
/// `item_count` entries are live. Invariants:
/// - `item_count <= max_items`
/// - `bound_textures.len() <= max_textures`
/// - every live `texture_slots` entry is `< bound_textures.len()`
/// - a texture appears at most once in `bound_textures`
pub struct BatchData {
    pub max_items: usize,
    pub max_textures: usize,

    pub item_count: usize,

    /// Per item: pin x/y in pixels, width, height, x, y, sin, cos
    pub geometry: Vec<f32>,
    /// Per item: u0, v0, u1, v1
    pub uvs: Vec<f32>,
    pub texture_slots: Vec<u8>,
    pub tints: Vec<Color>,

    /// Textures bound in this batch, indexed by slot
    pub bound_textures: Vec<Texture>,
    /// Slot lookup by texture identity. Lives here, never on the texture.
    pub slot_lookup: FxHashMap<TextureId, u8>,

    pub stats: BatchStats,
}

/// Running totals since the batch was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Flushes that reached the device
    pub flushes: u64,
    /// Flushes forced by a full item or texture table
    pub implicit_flushes: u64,
    pub items_flushed: u64,
    pub texture_binds: u64,
}

impl std::fmt::Display for BatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Batch: {} flushes ({} implicit), {} items, {} texture binds",
            self.flushes, self.implicit_flushes, self.items_flushed, self.texture_binds
        )
    }
}
