//=========================================================================
// Platform Subsystem
//
// Hosts the application loop inside the winit event loop.
//
// Architecture:
// ```text
//  Main Thread (winit)
//  ┌────────────────────────────────────────────────────┐
//  │  WindowEvent                                       │
//  │   ↓                                                │
//  │  InputProcessor  (modifiers, cursor → pixel space) │
//  │   ↓                                                │
//  │  InputBuffer     (ordered, moves coalesced)        │
//  │   ↓                                                │
//  │  about_to_wait ── TickClock due? ──► AppLoop::tick │
//  │                                         ↓          │
//  │                                       Canvas       │
//  │                                         ↓          │
//  │  RedrawRequested ──► pixels frame ──► present      │
//  │                                                    │
//  │  ControlFlow::WaitUntil(next deadline)             │
//  └────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Single thread**: input, update and render run in winit callbacks,
//   so scenes never need to be `Send`
// - **Deadline pacing**: the loop sleeps until the next tick instead of
//   blocking on input
// - **Fixed logical resolution**: scenes draw into a canvas of the
//   configured size; `pixels` scales it to the window
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::sync::Arc;
use std::time::Instant;

use log::*;
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::ScreenConfig;
use crate::core::input::InputEvent;
use crate::core::render::Canvas;
use crate::core::scene::SceneKey;
use crate::core::{AppLoop, TickClock, TickControl};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Window-system failures. All of them are fatal.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[source] OsError),

    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[source] pixels::Error),

    #[error("cannot create a {width}x{height} drawing surface")]
    InvalidSurfaceSize { width: u32, height: u32 },
}

//=== Platform ============================================================

/// Window, frame buffer and input aggregation around one [`AppLoop`].
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` allocates the canvas
/// 2. **Execution**: `platform.run()` blocks in the winit event loop
/// 3. **Resume**: window and `pixels` buffer are created lazily
/// 4. **Shutdown**: `AppLoop::tick` returns `Exit` → event loop exits
pub(crate) struct Platform<S: SceneKey> {
    screen: ScreenConfig,
    app: AppLoop<S>,
    clock: TickClock,
    canvas: Canvas,

    /// Input accumulated since the last tick.
    buffer: InputBuffer,
    input_processor: InputProcessor,

    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,

    /// First fatal error raised inside a callback, returned from `run`.
    error: Option<PlatformError>,
}

impl<S: SceneKey> Platform<S> {
    //--- Construction -----------------------------------------------------

    /// Creates the platform. The window is created later, in `resumed()`.
    pub fn new(screen: ScreenConfig, app: AppLoop<S>, tps: f64) -> Result<Self, PlatformError> {
        let canvas = Canvas::new(screen.width, screen.height).ok_or(
            PlatformError::InvalidSurfaceSize {
                width: screen.width,
                height: screen.height,
            },
        )?;

        info!(target: "platform", "Platform subsystem initialized ({}x{} @ {} TPS)", screen.width, screen.height, tps);
        Ok(Self {
            screen,
            app,
            clock: TickClock::new(tps, Instant::now()),
            canvas,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            window: None,
            pixels: None,
            error: None,
        })
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the application loop exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot start, or the
    /// first fatal error raised while it ran (window or pixel buffer).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        info!(target: "platform", "Event loop finished after {} ticks", self.clock.ticks());
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Runs one application tick over the buffered input.
    fn run_tick(&mut self, now: Instant) -> TickControl {
        let count = self.buffer.len();
        if count > 0 {
            trace!(target: "platform::input", "Dispatching {} events", count);
        }

        let control = self.app.tick(self.buffer.drain(), &mut self.canvas);
        self.clock.advance(now);
        control
    }

    /// Runs a tick and reacts to its outcome.
    fn step(&mut self, event_loop: &ActiveEventLoop, now: Instant) {
        match self.run_tick(now) {
            TickControl::Continue => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            TickControl::Exit => {
                info!(target: "platform", "Application loop finished");
                self.buffer.clear();
                event_loop.exit();
            }
        }
    }

    /// Copies the canvas into the `pixels` frame and presents it.
    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        pixels.frame_mut().copy_from_slice(self.canvas.pixels());
        if let Err(e) = pixels.render() {
            error!(target: "platform", "Frame presentation failed: {}", e);
            self.fail(event_loop, PlatformError::PixelBuffer(e));
        }
    }

    /// Maps a window position to canvas pixels.
    ///
    /// Positions outside the canvas stay outside (possibly negative), so
    /// nothing is hovered while the cursor is in the letterbox.
    fn to_canvas_space(&self, x: f64, y: f64) -> (f32, f32) {
        match &self.pixels {
            Some(pixels) => match pixels.window_pos_to_pixel((x as f32, y as f32)) {
                Ok((px, py)) => (px as f32, py as f32),
                Err((px, py)) => (px as f32, py as f32),
            },
            None => (x as f32, y as f32),
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.screen.title.clone())
            .with_inner_size(LogicalSize::new(self.screen.width, self.screen.height));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(PlatformError::WindowCreation)?,
        );

        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(self.screen.width, self.screen.height, texture)
            .map_err(PlatformError::PixelBuffer)?;

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlatformError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl<S: SceneKey> ApplicationHandler for Platform<S> {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            error!(target: "platform", "{}", e);
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.buffer.push(InputEvent::CloseRequested);
                self.step(event_loop, Instant::now());
            }

            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        warn!(target: "platform", "Surface resize to {}x{} failed: {}", size.width, size.height, e);
                    }
                }
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = self.to_canvas_space(position.x, position.y);
                let event = self.input_processor.process_mouse_move(x, y);
                self.buffer.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some(event) => self.buffer.push(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => self.present(event_loop),

            _ => {}
        }
    }

    /// Runs a tick when the deadline has passed, then sleeps until the next.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.clock.is_due(now) {
            self.step(event_loop, now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::render::Surface;
    use crate::core::scene::{ControlSignal, Scene, SceneManager};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    /// Quits on Escape, otherwise idles.
    struct Idle;

    impl Scene<TestScene> for Idle {
        fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<TestScene> {
            match event {
                InputEvent::KeyDown { key: KeyCode::Escape, .. } => ControlSignal::Quit,
                _ => ControlSignal::Continue,
            }
        }

        fn update(&mut self) {}

        fn render(&self, _surface: &mut dyn Surface) {}
    }

    fn screen(width: u32, height: u32) -> ScreenConfig {
        ScreenConfig {
            width,
            height,
            title: "test".into(),
        }
    }

    fn platform() -> Platform<TestScene> {
        let mut scenes = SceneManager::new();
        scenes.register_default(TestScene::Main, Idle);
        Platform::new(screen(32, 24), AppLoop::new(scenes), 60.0).unwrap()
    }

    #[test]
    fn platform_creation_is_lazy() {
        let platform = platform();
        assert!(platform.window.is_none(), "Window should be created lazily");
        assert!(platform.pixels.is_none());
        assert_eq!(platform.canvas.size(), (32, 24));
    }

    #[test]
    fn zero_sized_screen_is_rejected() {
        let result = Platform::new(screen(0, 24), AppLoop::new(SceneManager::<TestScene>::new()), 60.0);
        assert!(matches!(
            result,
            Err(PlatformError::InvalidSurfaceSize { width: 0, height: 24 })
        ));
    }

    #[test]
    fn tick_drains_buffer_and_advances_clock() {
        let mut platform = platform();
        platform.buffer.push(InputEvent::key_down(KeyCode::Space));

        let control = platform.run_tick(Instant::now());

        assert_eq!(control, TickControl::Continue);
        assert!(platform.buffer.is_empty());
        assert_eq!(platform.clock.ticks(), 1);
    }

    #[test]
    fn buffered_close_request_exits() {
        let mut platform = platform();
        platform.buffer.push(InputEvent::CloseRequested);

        assert_eq!(platform.run_tick(Instant::now()), TickControl::Exit);
    }

    #[test]
    fn scene_quit_exits() {
        let mut platform = platform();
        platform.buffer.push(InputEvent::key_down(KeyCode::Escape));

        assert_eq!(platform.run_tick(Instant::now()), TickControl::Exit);
    }

    #[test]
    fn cursor_maps_through_without_pixels() {
        let platform = platform();
        assert_eq!(platform.to_canvas_space(12.5, 7.0), (12.5, 7.0));
    }

    #[test]
    fn platform_error_display_format() {
        let err = PlatformError::InvalidSurfaceSize { width: 0, height: 0 };
        assert_eq!(err.to_string(), "cannot create a 0x0 drawing surface");
    }
}
