//! Frame Operations - Pure DOP Functions

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::frame_data::{DrawContext, FrameDriverData, FrameOutcome, HostEvent};
use super::game::Game;
use crate::batch;
use crate::device::RenderDevice;
use crate::error::{EngineError, EngineResult};
use crate::EngineConfig;

/// Build a frame driver whose batch uses the configured capacities
pub fn create_frame_driver(config: &EngineConfig) -> EngineResult<FrameDriverData> {
    Ok(FrameDriverData {
        batch: batch::create_batch(config.max_items, config.max_textures)?,
        frame_count: 0,
        clear_color: config.clear_color,
    })
}

/// Run the game's startup callback
pub fn startup<G: Game + ?Sized>(game: &mut G, device: &mut dyn RenderDevice) -> EngineResult<()> {
    game.on_startup(device)
        .map_err(|e| EngineError::InitializationError(format!("{:#}", e)))?;
    log::info!("[frame_operations::startup] Game started");
    Ok(())
}

pub fn update<G: Game + ?Sized>(game: &mut G) {
    game.on_update();
}

/// Update, then draw one frame
pub fn tick<G: Game + ?Sized>(
    driver: &mut FrameDriverData,
    device: &mut dyn RenderDevice,
    game: &mut G,
) -> FrameOutcome {
    update(game);
    run_frame(driver, device, game)
}

/// Draw one frame: clear, call `on_draw`, flush.
///
/// An error or panic from `on_draw` is logged and ends the frame early;
/// items already drawn are still flushed.
pub fn run_frame<G: Game + ?Sized>(
    driver: &mut FrameDriverData,
    device: &mut dyn RenderDevice,
    game: &mut G,
) -> FrameOutcome {
    driver.frame_count += 1;
    let frame_number = driver.frame_count;

    let leftover_items = batch::item_count(&driver.batch);
    if leftover_items > 0 {
        log::warn!(
            "[frame_operations::run_frame] Batch not empty at start of frame {} ({} items)",
            frame_number,
            leftover_items
        );
    }
    let flushes_before = driver.batch.stats.flushes;

    device.clear(driver.clear_color);

    let result = {
        let mut ctx = DrawContext {
            batch: &mut driver.batch,
            device: &mut *device,
            frame_number,
        };
        panic::catch_unwind(AssertUnwindSafe(|| game.on_draw(&mut ctx, frame_number)))
    };

    let completed = match result {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            log::error!(
                "[frame_operations::run_frame] In on_draw (frame {}): {:?}",
                frame_number,
                error
            );
            false
        }
        Err(payload) => {
            log::error!(
                "[frame_operations::run_frame] Panic in on_draw (frame {}): {}",
                frame_number,
                panic_message(payload.as_ref())
            );
            false
        }
    };

    batch::flush(&mut driver.batch, device);

    FrameOutcome {
        frame_number,
        completed,
        flushes: driver.batch.stats.flushes - flushes_before,
        leftover_items,
    }
}

/// Route a host input event to the matching callback
pub fn dispatch_event<G: Game + ?Sized>(game: &mut G, event: &HostEvent) {
    match event {
        HostEvent::KeyDown { key, code, flags } => game.on_key_down(key, *code, *flags),
        HostEvent::KeyUp { key, code, flags } => game.on_key_up(key, *code, *flags),
        HostEvent::MouseMove {
            x,
            y,
            buttons,
            flags,
        } => game.on_mouse_move(*x, *y, *buttons, *flags),
        HostEvent::MouseDown {
            x,
            y,
            buttons,
            flags,
            button,
        } => game.on_mouse_down(*x, *y, *buttons, *flags, *button),
        HostEvent::MouseUp {
            x,
            y,
            buttons,
            flags,
            button,
        } => game.on_mouse_up(*x, *y, *buttons, *flags, *button),
        HostEvent::FocusChange { has_focus } => game.on_focus_change(*has_focus),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::device::{DeviceCall, HeadlessDevice};
    use crate::frame::key_flags;
    use crate::pixels;
    use crate::stamp::{self, StampData};
    use crate::texture::{create_texture, TextureSettings};

    /// Draws `count` copies of its stamp, then fails or panics if asked to
    struct Scripted {
        stamp: Option<StampData>,
        count: usize,
        fail: bool,
        panic: bool,
        updates: u32,
        events: Vec<String>,
    }

    impl Scripted {
        fn new(count: usize) -> Self {
            Self {
                stamp: None,
                count,
                fail: false,
                panic: false,
                updates: 0,
                events: Vec::new(),
            }
        }
    }

    impl Game for Scripted {
        fn on_startup(&mut self, device: &mut dyn RenderDevice) -> anyhow::Result<()> {
            let texture = create_texture(
                device,
                &pixels::create_pixels(4, 4),
                TextureSettings::default(),
            )?;
            self.stamp = Some(stamp::create_stamp(&texture));
            Ok(())
        }

        fn on_update(&mut self) {
            self.updates += 1;
        }

        fn on_draw(&mut self, ctx: &mut DrawContext<'_>, _frame_number: u64) -> anyhow::Result<()> {
            let s = self
                .stamp
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("not started"))?;
            for i in 0..self.count {
                stamp::stamp_at(s, ctx, i as f32, 0.0);
            }
            if self.fail {
                anyhow::bail!("asset went missing");
            }
            if self.panic {
                panic!("draw exploded");
            }
            // never reached after a failure
            stamp::stamp(s, ctx);
            Ok(())
        }

        fn on_key_down(&mut self, key: &str, _code: u32, flags: u32) {
            self.events.push(format!("down {} {}", key, flags));
        }

        fn on_mouse_up(&mut self, x: i32, y: i32, _buttons: u32, _flags: u32, button: u32) {
            self.events.push(format!("up {},{} {}", x, y, button));
        }

        fn on_focus_change(&mut self, has_focus: bool) {
            self.events.push(format!("focus {}", has_focus));
        }
    }

    fn started(count: usize) -> (FrameDriverData, HeadlessDevice, Scripted) {
        crate::logging::init_test_logging();
        let driver = create_frame_driver(&EngineConfig::default()).unwrap();
        let mut device = HeadlessDevice::new();
        let mut game = Scripted::new(count);
        startup(&mut game, &mut device).unwrap();
        device.reset();
        (driver, device, game)
    }

    #[test]
    fn test_frame_clears_draws_and_flushes() {
        let (mut driver, mut device, mut game) = started(2);

        let outcome = tick(&mut driver, &mut device, &mut game);
        assert_eq!(
            outcome,
            FrameOutcome {
                frame_number: 1,
                completed: true,
                flushes: 1,
                leftover_items: 0,
            }
        );
        assert_eq!(game.updates, 1);
        assert_eq!(device.calls[0], DeviceCall::Clear(color::BLACK));
        assert_eq!(device.draws().len(), 1);
        assert_eq!(device.draws()[0].item_count, 3);
        assert!(batch::is_empty(&driver.batch));

        assert_eq!(run_frame(&mut driver, &mut device, &mut game).frame_number, 2);
        assert_eq!(device.clear_count(), 2);
    }

    #[test]
    fn test_draw_error_still_flushes_queued_items() {
        let (mut driver, mut device, mut game) = started(2);
        game.fail = true;

        let outcome = run_frame(&mut driver, &mut device, &mut game);
        assert!(!outcome.completed);
        assert_eq!(outcome.flushes, 1);
        assert_eq!(device.draws()[0].item_count, 2);

        // the next frame runs normally
        game.fail = false;
        assert!(run_frame(&mut driver, &mut device, &mut game).completed);
    }

    #[test]
    fn test_draw_panic_is_contained() {
        let (mut driver, mut device, mut game) = started(1);
        game.panic = true;

        let outcome = run_frame(&mut driver, &mut device, &mut game);
        assert!(!outcome.completed);
        assert_eq!(device.draws().len(), 1);
        assert!(batch::is_empty(&driver.batch));
    }

    #[test]
    fn test_idle_frame_issues_no_draw() {
        let (mut driver, mut device, mut game) = started(0);
        let outcome = run_frame(&mut driver, &mut device, &mut game);
        // one stamp is drawn after the loop
        assert_eq!(outcome.flushes, 1);

        struct Idle;
        impl Game for Idle {}
        device.reset();
        let outcome = run_frame(&mut driver, &mut device, &mut Idle);
        assert_eq!(outcome.flushes, 0);
        assert_eq!(device.calls, vec![DeviceCall::Clear(color::BLACK)]);
    }

    #[test]
    fn test_leftover_items_are_flushed_with_next_frame() {
        let (mut driver, mut device, mut game) = started(1);
        // drawn outside any frame
        let s = game.stamp.clone().unwrap();
        batch::submit(&mut driver.batch, &mut device, &s, 0.0, 0.0);

        let outcome = run_frame(&mut driver, &mut device, &mut game);
        assert!(outcome.completed);
        assert_eq!(outcome.leftover_items, 1);
        assert_eq!(device.draws()[0].item_count, 3);

        let outcome = run_frame(&mut driver, &mut device, &mut game);
        assert_eq!(outcome.leftover_items, 0);
    }

    #[test]
    fn test_overflow_counts_in_outcome() {
        let (mut driver, mut device, mut game) = started(crate::constants::MAX_ITEMS);
        let outcome = run_frame(&mut driver, &mut device, &mut game);
        assert_eq!(outcome.flushes, 2);
        assert_eq!(driver.batch.stats.implicit_flushes, 1);
    }

    #[test]
    fn test_startup_error_is_initialization_error() {
        struct Broken;
        impl Game for Broken {
            fn on_startup(&mut self, _device: &mut dyn RenderDevice) -> anyhow::Result<()> {
                anyhow::bail!("no assets")
            }
        }
        let mut device = HeadlessDevice::new();
        match startup(&mut Broken, &mut device) {
            Err(EngineError::InitializationError(msg)) => assert_eq!(msg, "no assets"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_event() {
        let mut game = Scripted::new(0);
        dispatch_event(
            &mut game,
            &HostEvent::KeyDown {
                key: "a".to_string(),
                code: 65,
                flags: key_flags::SHIFT,
            },
        );
        dispatch_event(
            &mut game,
            &HostEvent::MouseUp {
                x: 3,
                y: 4,
                buttons: 0,
                flags: 0,
                button: 1,
            },
        );
        dispatch_event(&mut game, &HostEvent::FocusChange { has_focus: false });
        dispatch_event(
            &mut game,
            &HostEvent::MouseMove {
                x: 0,
                y: 0,
                buttons: 0,
                flags: 0,
            },
        );
        assert_eq!(game.events, vec!["down a 1", "up 3,4 1", "focus false"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            max_textures: 0,
            ..EngineConfig::default()
        };
        assert!(create_frame_driver(&config).is_err());
    }
}
