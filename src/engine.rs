//=========================================================================
// Aetheric Stage Engine
//
// Main entry point and coordinator for the shell.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                    │
//         ├─ with_tps()              └─ owns scenes       └─ Platform (winit)
//         ├─ with_background()          and resources        └─ AppLoop::tick
//         └─ with_clear_color()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::info;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::config::{AppConfig, ConfigError, ScreenConfig};
use crate::core::logging::LoggingError;
use crate::core::render::{Color, ImageData};
use crate::core::resources::ResourceCache;
use crate::core::{AppLoop, SceneKey, SceneManager};
use crate::platform::{Platform, PlatformError};

//=== EngineError =========================================================

/// Top-level failure of a stage run: startup (config, logging) or the
/// window system.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=== InitContext =========================================================

/// Shared state handed to the scene initialization closure.
pub struct InitContext<'a> {
    pub resources: &'a Arc<ResourceCache>,
    pub screen: &'a ScreenConfig,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Background**: none
/// - **Clear color**: black
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use aetheric_stage::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Main }
/// impl SceneKey for GameScene {}
///
/// let config = AppConfig::load("config.toml")?;
/// let resources = Arc::new(ResourceCache::load(&config.assets.dir, 24));
///
/// EngineBuilder::<GameScene>::from_config(&config)
///     .with_tps(120.0)
///     .build(resources)
///     .init(|scenes, ctx| {
///         // scenes.register_default(GameScene::Main, ...);
///     })
///     .run()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EngineBuilder<S: SceneKey> {
    screen: ScreenConfig,
    tps: f64,
    background: Option<String>,
    clear_color: Color,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a builder for a window described by `screen`.
    pub fn new(screen: ScreenConfig) -> Self {
        Self {
            screen,
            tps: 60.0,
            background: None,
            clear_color: Color::BLACK,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Creates a builder using the screen, TPS and background from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.screen.clone())
            .with_tps(config.engine.tps)
            .with_background(config.engine.background.clone())
    }

    /// Sets the target ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Names the image resource drawn behind every scene.
    pub fn with_background(mut self, name: impl Into<String>) -> Self {
        self.background = Some(name.into());
        self
    }

    /// Sets the color the surface is cleared to each tick.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Builds the engine around an already loaded resource cache.
    ///
    /// A background that cannot be resolved is left out.
    pub fn build(self, resources: Arc<ResourceCache>) -> Engine<S> {
        info!(
            "Building engine ({}x{} \"{}\", TPS: {})",
            self.screen.width, self.screen.height, self.screen.title, self.tps
        );

        // A failed lookup is already logged by the cache.
        let background: Option<Arc<ImageData>> = self
            .background
            .as_deref()
            .and_then(|name| resources.image(name).ok());

        Engine {
            screen: self.screen,
            tps: self.tps,
            clear_color: self.clear_color,
            background,
            resources,
            scenes: SceneManager::new(),
        }
    }
}

//=== Engine ==============================================================

/// Aetheric Stage runtime.
///
/// Create via [`EngineBuilder`], register scenes with [`Engine::init`],
/// then call [`Engine::run`].
pub struct Engine<S: SceneKey> {
    screen: ScreenConfig,
    tps: f64,
    clear_color: Color,
    background: Option<Arc<ImageData>>,
    resources: Arc<ResourceCache>,
    scenes: SceneManager<S>,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Registers scenes before the engine starts running.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneManager<S>, &InitContext<'_>),
    {
        info!("Initializing scenes");

        let ctx = InitContext {
            resources: &self.resources,
            screen: &self.screen,
        };
        init_fn(&mut self.scenes, &ctx);

        info!("Scene initialization complete ({} scenes)", self.scenes.len());
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn resources(&self) -> &Arc<ResourceCache> {
        &self.resources
    }

    pub fn tps(&self) -> f64 {
        self.tps
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    //--- Execution --------------------------------------------------------

    /// Converts the engine into a window-less application loop.
    ///
    /// Useful for driving ticks directly, e.g. from tests.
    pub fn into_app_loop(self) -> AppLoop<S> {
        AppLoop::new(self.scenes)
            .with_background(self.background)
            .with_clear_color(self.clear_color)
    }

    /// Opens the window and blocks until the application exits.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let screen = self.screen.clone();
        let tps = self.tps;
        let platform = Platform::new(screen, self.into_app_loop(), tps)?;
        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logging::testing::capture_logs;
    use crate::core::render::testing::{DrawCall, RecordingSurface};
    use crate::core::input::InputEvent;
    use crate::core::render::{Rect, Surface};
    use crate::core::scene::{ControlSignal, Scene};
    use crate::core::TickControl;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    struct Blank;

    impl Scene<TestScene> for Blank {
        fn handle_event(&mut self, _event: &InputEvent) -> ControlSignal<TestScene> {
            ControlSignal::Continue
        }

        fn update(&mut self) {}

        fn render(&self, _surface: &mut dyn Surface) {}
    }

    fn screen() -> ScreenConfig {
        ScreenConfig {
            width: 80,
            height: 60,
            title: "test".into(),
        }
    }

    fn cache_with_background() -> Arc<ResourceCache> {
        let mut cache = ResourceCache::empty(24);
        let image = ImageData::from_rgba8(2, 2, vec![255; 16]).unwrap();
        cache.insert_image("background", image);
        Arc::new(cache)
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestScene>::new(screen());
        assert_eq!(builder.tps, 60.0);
        assert!(builder.background.is_none());
        assert_eq!(builder.clear_color, Color::BLACK);
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::<TestScene>::new(screen()).with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<TestScene>::new(screen()).with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::<TestScene>::new(screen()).with_tps(-60.0);
    }

    #[test]
    fn missing_background_is_tolerated() {
        let builder = EngineBuilder::<TestScene>::new(screen()).with_background("nope");
        let mut built = None;
        let records = capture_logs(|| built = Some(builder.build(Arc::new(ResourceCache::empty(24)))));
        let engine = built.unwrap();

        assert!(!engine.has_background());
        let failures: Vec<_> = records.iter().filter(|(_, msg)| msg.contains("nope")).collect();
        assert_eq!(failures.len(), 1, "{records:?}");
        assert_eq!(failures[0].0, log::Level::Error);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::<TestScene>::new(screen())
            .with_tps(30.0)
            .with_background("background")
            .with_clear_color(Color::rgb(9, 9, 9))
            .build(cache_with_background());

        assert_eq!(engine.tps(), 30.0);
        assert!(engine.has_background());
    }

    #[test]
    fn engine_error_wraps_startup_failures() {
        let err = EngineError::from(ConfigError::Missing("screen.width"));
        assert!(matches!(err, EngineError::Config(ConfigError::Missing("screen.width"))));
        assert_eq!(err.to_string(), "missing required config key 'screen.width'");

        let err = EngineError::from(PlatformError::InvalidSurfaceSize { width: 0, height: 10 });
        assert_eq!(err.to_string(), "cannot create a 0x10 drawing surface");
    }

    #[test]
    fn engine_error_wraps_logging_failures() {
        let err = EngineError::from(LoggingError::Spawn(std::io::Error::other("no threads")));
        assert!(matches!(err, EngineError::Logging(LoggingError::Spawn(_))));
        assert_eq!(err.to_string(), "cannot start log worker: no threads");
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_receives_resources_and_screen() {
        let engine = EngineBuilder::<TestScene>::new(screen())
            .build(cache_with_background())
            .init(|scenes, ctx| {
                assert!(ctx.resources.contains("background"));
                assert_eq!(ctx.screen.width, 80);
                scenes.register_default(TestScene::Main, Blank);
            });

        assert_eq!(engine.scenes.current_key(), Some(TestScene::Main));
    }

    #[test]
    fn app_loop_draws_background_first() {
        let mut app = EngineBuilder::<TestScene>::new(screen())
            .with_background("background")
            .with_clear_color(Color::rgb(9, 9, 9))
            .build(cache_with_background())
            .init(|scenes, _| scenes.register_default(TestScene::Main, Blank))
            .into_app_loop();
        let mut surface = RecordingSurface::new(80, 60);

        assert_eq!(app.tick(Vec::new(), &mut surface), TickControl::Continue);
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Clear(Color::rgb(9, 9, 9)),
                DrawCall::BlitScaled { w: 2, h: 2, dest: Rect::new(0.0, 0.0, 80.0, 60.0) },
            ]
        );
    }
}
