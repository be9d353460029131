//! The callbacks a game implements

use super::frame_data::DrawContext;
use crate::device::RenderDevice;

/// A game driven by the frame driver. Every callback has an empty default.
///
/// `on_startup` and `on_draw` may fail: a startup error aborts startup, a
/// draw error is logged and the frame ends early.
#[allow(unused_variables)]
pub trait Game {
    /// Load textures and atlases here
    fn on_startup(&mut self, device: &mut dyn RenderDevice) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per tick, before the frame is drawn
    fn on_update(&mut self) {}

    fn on_draw(&mut self, ctx: &mut DrawContext<'_>, frame_number: u64) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_key_down(&mut self, key: &str, code: u32, flags: u32) {}

    fn on_key_up(&mut self, key: &str, code: u32, flags: u32) {}

    fn on_mouse_move(&mut self, x: i32, y: i32, buttons: u32, flags: u32) {}

    /// `button` is the button pressed; `buttons` has bit `n - 1` set for
    /// each button `n` held
    fn on_mouse_down(&mut self, x: i32, y: i32, buttons: u32, flags: u32, button: u32) {}

    fn on_mouse_up(&mut self, x: i32, y: i32, buttons: u32, flags: u32, button: u32) {}

    fn on_focus_change(&mut self, has_focus: bool) {}
}
