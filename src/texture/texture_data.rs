//! Texture Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in texture_operations.rs

use std::sync::Arc;

/// Identity of a texture. Unique per process; batches key slots by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Opaque handle the device hands back from `create_texture`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceTextureHandle(pub u64);

/// Pixel layout of uploaded data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// One packed `0xAABBGGRR` word per pixel (R, G, B, A in memory)
    #[default]
    Rgba8888,
}

/// Texture coordinate wrapping, applied per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Minification / magnification filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

/// Sampling parameters applied each time the texture is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureSettings {
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
}

/// Padding around the edges of a sheet when splitting it into tiles, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexturePadding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// A device-resident image
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub id: TextureId,

    /// Size of the source image in pixels. Normalized UVs are computed
    /// against this size, so they stay valid if the upload was downscaled.
    pub width: u32,
    pub height: u32,

    /// Size actually uploaded (smaller than the source when it exceeded the
    /// device's maximum texture size)
    pub device_width: u32,
    pub device_height: u32,

    pub format: PixelFormat,
    pub settings: TextureSettings,
    pub handle: DeviceTextureHandle,
}

/// Shared, read-only texture reference held by stamps and batches
pub type Texture = Arc<TextureData>;
