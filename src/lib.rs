//=========================================================================
// Aetheric Stage - Library Root
//
// A fixed-tick scene shell: one window, a preloaded resource cache, a
// keyed set of scenes and clickable widgets.
//
// Typical usage:
// ```no_run
// use std::sync::Arc;
// use aetheric_stage::prelude::*;
// use aetheric_stage::scenes::{self, AppScene};
//
// let config = AppConfig::load_from_env()?;
// let resources = Arc::new(ResourceCache::load(&config.assets.dir, 24));
//
// EngineBuilder::<AppScene>::from_config(&config)
//     .build(resources)
//     .init(|s, ctx| scenes::register_all(s, ctx.resources, &config))
//     .run()?;
// # Ok::<(), Box<dyn std::error::Error>>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the window-independent systems: config, logging, input
// events, drawing, resources, scenes and widgets.
//
// `scenes` holds the bundled menu and image viewer.
//
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit event loop and the pixel buffer and is not
// part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError, InitContext};
pub use platform::PlatformError;
