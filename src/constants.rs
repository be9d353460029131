//! Engine-wide constants
//!
//! Batch capacities and the layout of the flat per-item buffers handed to the
//! render device.

/// Default number of stamps a batch holds before it flushes
pub const MAX_ITEMS: usize = 512;

/// Default number of textures bound at once in a single batch
pub const MAX_TEXTURES: usize = 6;

/// Hard ceiling on texture units a device exposes to one draw.
/// Texture slot bytes are `u8`, and no backend we target offers more than 16.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Floats per item in the geometry buffer:
/// pin x/y (pixels), size w/h, position x/y, sin/cos of the angle
pub const GEOMETRY_STRIDE: usize = 8;

/// Floats per item in the UV buffer: u0, v0, u1, v1
pub const UV_STRIDE: usize = 4;

/// Texture size assumed when the device does not report one
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 4096;

/// Largest index an atlas region may carry
pub const MAX_REGION_INDEX: u32 = 65_535;

/// Canvas size limits accepted by `EngineConfig::validate`
pub mod canvas {
    pub const MIN_DIMENSION: u32 = 1;
    pub const MAX_DIMENSION: u32 = 16_384;
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 500;
}

static_assertions::const_assert!(MAX_TEXTURES <= MAX_TEXTURE_UNITS);
static_assertions::const_assert!(MAX_TEXTURE_UNITS <= u8::MAX as usize);
