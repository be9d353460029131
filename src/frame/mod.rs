//! Frame Module - the per-frame lifecycle
//!
//! A host calls `tick` once per display refresh and forwards input through
//! `dispatch_event`. Each frame clears the screen, runs the game's draw
//! callback against the frame driver's batch, and flushes whatever was
//! drawn, even when the callback fails.

pub mod frame_data;
pub mod frame_operations;
pub mod game;

pub use frame_data::{key_flags, DrawContext, FrameDriverData, FrameOutcome, HostEvent};
pub use frame_operations::{
    create_frame_driver, dispatch_event, run_frame, startup, tick, update,
};
pub use game::Game;
