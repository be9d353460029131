//! Device Module - the boundary to the host graphics backend
//!
//! The core never issues draw calls itself. It prepares flat buffers and
//! calls through `RenderDevice`; a host (WebGL, wgpu, a software rasterizer)
//! implements the trait. `HeadlessDevice` records every call instead of
//! drawing, for tests and headless runs.

pub mod headless_device;
pub mod render_device;

pub use headless_device::{DeviceCall, HeadlessDevice, RecordedBatch};
pub use render_device::{BatchView, RenderDevice, TextureDescriptor};
