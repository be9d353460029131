//! Stampwork - a lightweight 2D game framework
//!
//! Drawing is built from textured "stamps": views onto a region of a
//! texture with a pin, size, rotation, flips and tint. Stamps drawn during a
//! frame are packed into a batch that flushes to the host's `RenderDevice`
//! when it fills up or the frame ends. Texture atlases in the Spine text
//! format provide named and indexed stamps for sprites and animations.
//!
//! Data lives in plain `*_data.rs` structs; behavior lives in free
//! functions in the matching `*_operations.rs` files.

pub mod constants;
pub mod error;
pub mod logging;

pub mod color;
pub mod math;

pub mod atlas;
pub mod batch;
pub mod device;
pub mod frame;
pub mod pixels;
pub mod stamp;
pub mod texture;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use atlas::{AtlasError, TextureAtlasData};
pub use batch::{BatchData, BatchStats};
pub use color::Color;
pub use device::{HeadlessDevice, RenderDevice};
pub use error::{EngineError, EngineResult, OptionExt};
pub use frame::{DrawContext, FrameDriverData, FrameOutcome, Game, HostEvent};
pub use pixels::PixelsData;
pub use stamp::StampData;
pub use texture::{Texture, TextureData};

use crate::constants::{canvas, MAX_ITEMS, MAX_TEXTURES, MAX_TEXTURE_UNITS};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Stamps per batch before an implicit flush
    pub max_items: usize,
    /// Textures bound per batch before an implicit flush
    pub max_textures: usize,
    pub clear_color: Color,
    /// Default for atlases created through `Engine::create_atlas`
    pub auto_index: bool,
    /// Relative asset paths are resolved against this directory
    pub asset_root: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Stampwork".to_string(),
            canvas_width: canvas::DEFAULT_WIDTH,
            canvas_height: canvas::DEFAULT_HEIGHT,
            max_items: MAX_ITEMS,
            max_textures: MAX_TEXTURES,
            clear_color: color::BLACK,
            auto_index: false,
            asset_root: None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::DeserializationError {
            context: "EngineConfig".to_string(),
            error: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| error::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_items == 0 {
            return Err(invalid("max_items", self.max_items, "must be at least 1"));
        }

        if self.max_textures == 0 {
            return Err(invalid(
                "max_textures",
                self.max_textures,
                "must be at least 1",
            ));
        }

        if self.max_textures > MAX_TEXTURE_UNITS {
            return Err(invalid(
                "max_textures",
                self.max_textures,
                &format!("exceeds {} texture units", MAX_TEXTURE_UNITS),
            ));
        }

        let dimensions = canvas::MIN_DIMENSION..=canvas::MAX_DIMENSION;
        if !dimensions.contains(&self.canvas_width) {
            return Err(invalid(
                "canvas_width",
                self.canvas_width,
                "outside 1..=16384",
            ));
        }
        if !dimensions.contains(&self.canvas_height) {
            return Err(invalid(
                "canvas_height",
                self.canvas_height,
                "outside 1..=16384",
            ));
        }

        log::info!(
            "[EngineConfig] Configuration validated: {}x{} canvas, {} items / {} textures per batch",
            self.canvas_width,
            self.canvas_height,
            self.max_items,
            self.max_textures
        );
        Ok(())
    }

    /// Absolute paths pass through; relative ones are joined to `asset_root`
    pub fn resolve_path(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        match &self.asset_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// A configured device plus the frame driver that draws to it.
///
/// Hosts own the loop: call `start` once, then `frame` per refresh and
/// `event` per input event.
pub struct Engine<D: RenderDevice> {
    config: EngineConfig,
    driver: FrameDriverData,
    device: D,
}

impl<D: RenderDevice> Engine<D> {
    pub fn new(config: EngineConfig, device: D) -> EngineResult<Self> {
        log::debug!("[Engine::new] Starting engine initialization");

        if let Err(e) = config.validate() {
            log::error!("[Engine::new] Configuration validation failed: {}", e);
            return Err(e);
        }
        let driver = frame::create_frame_driver(&config)?;

        log::info!("[Engine::new] Engine initialization complete");
        Ok(Self {
            config,
            driver,
            device,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn driver(&self) -> &FrameDriverData {
        &self.driver
    }

    pub fn start<G: Game + ?Sized>(&mut self, game: &mut G) -> EngineResult<()> {
        frame::startup(game, &mut self.device)
    }

    /// Update and draw one frame
    pub fn frame<G: Game + ?Sized>(&mut self, game: &mut G) -> FrameOutcome {
        frame::tick(&mut self.driver, &mut self.device, game)
    }

    pub fn event<G: Game + ?Sized>(&mut self, game: &mut G, event: &HostEvent) {
        frame::dispatch_event(game, event);
    }

    /// Empty atlas using the configured auto-index default
    pub fn create_atlas(&self) -> TextureAtlasData {
        atlas::create_atlas(self.config.auto_index)
    }

    /// Load an atlas file (resolved against `asset_root`) and its page images
    pub fn load_atlas(&mut self, atlas: &mut TextureAtlasData, file_name: &str) -> EngineResult<()> {
        let path = self.config.resolve_path(file_name);
        atlas::load_atlas(atlas, &mut self.device, &mut atlas::FilePageSource, &path)
    }

    /// Load an image file (resolved against `asset_root`) as a texture
    pub fn load_texture(&mut self, file_name: &str) -> EngineResult<Texture> {
        let path = self.config.resolve_path(file_name);
        texture::load_texture(&mut self.device, &path, texture::TextureSettings::default())
    }
}
