//! Texture Module
//!
//! A texture is pixel data resident on the render device plus the sampling
//! parameters applied whenever it is bound. Textures are shared by reference
//! (`Texture = Arc<TextureData>`) between every stamp drawn from them; batch
//! slot assignment is tracked by the batch, never on the texture.

pub mod texture_data;
pub mod texture_operations;

pub use texture_data::{
    DeviceTextureHandle, PixelFormat, Texture, TextureData, TextureFilter, TextureId,
    TextureSettings, TexturePadding, TextureWrap,
};
pub use texture_operations::{
    create_texture, load_texture, next_texture_id, split_into_tiles, split_into_tiles_2d,
    split_into_tiles_by_size, split_into_tiles_by_size_2d,
};
