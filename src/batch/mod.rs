//! Batch Module - draw-call aggregation
//!
//! Stamps submitted during a frame are packed into fixed-capacity flat
//! arrays (one slot per item for geometry, UVs, texture slot and tint) and
//! handed to the device in as few draw calls as possible. Two independent
//! ceilings apply: items per batch and textures bound per batch. Hitting
//! either one flushes the batch before the new item is recorded.

pub mod batch_data;
pub mod batch_operations;


pub use batch_data::{BatchData, BatchStats};
pub use batch_operations::{
    create_batch, create_default_batch, flush, is_empty, item_count, slot_of, submit,
    texture_count, view,
};
