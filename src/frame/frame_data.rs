//! Frame Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in frame_operations.rs

use crate::batch::BatchData;
use crate::color::Color;
use crate::device::RenderDevice;

/// State carried from frame to frame
pub struct FrameDriverData {
    pub batch: BatchData,
    /// Frames started so far; the current frame's number while drawing
    pub frame_count: u64,
    pub clear_color: Color,
}

/// What drawing needs: the batch to record into and the device it flushes
/// to. Handed to `Game::on_draw` and passed on to `stamp::stamp`.
pub struct DrawContext<'a> {
    pub batch: &'a mut BatchData,
    pub device: &'a mut dyn RenderDevice,
    pub frame_number: u64,
}

/// Result of one `run_frame`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub frame_number: u64,
    /// False when the draw callback returned an error or panicked
    pub completed: bool,
    /// Batches sent to the device during the frame, implicit ones included
    pub flushes: u64,
    /// Items already queued when the frame began, drawn outside any frame
    pub leftover_items: usize,
}

/// Input forwarded from the host runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    KeyDown {
        key: String,
        code: u32,
        flags: u32,
    },
    KeyUp {
        key: String,
        code: u32,
        flags: u32,
    },
    MouseMove {
        x: i32,
        y: i32,
        buttons: u32,
        flags: u32,
    },
    MouseDown {
        x: i32,
        y: i32,
        buttons: u32,
        flags: u32,
        button: u32,
    },
    MouseUp {
        x: i32,
        y: i32,
        buttons: u32,
        flags: u32,
        button: u32,
    },
    FocusChange {
        has_focus: bool,
    },
}

/// Modifier bits carried in the `flags` of key and mouse events
pub mod key_flags {
    pub const SHIFT: u32 = 0b0001;
    pub const CONTROL: u32 = 0b0010;
    pub const ALT: u32 = 0b0100;
    pub const META: u32 = 0b1000;
}
