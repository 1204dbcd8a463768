//=========================================================================
// Core Systems
//
// Window-system independent part of the shell.
//
// Responsibilities:
// - Scene lifecycle and switching (`scene`)
// - Fixed-tick dispatch of input to the active scene (`app_loop`, `clock`)
// - Preloaded resources with typed lookup (`resources`)
// - Drawing surface abstraction and widgets (`render`, `ui`)
// - Configuration and logging setup (`config`, `logging`)
//
// Notes:
// Nothing here touches winit. The platform layer converts OS events
// into `InputEvent`s, owns the surface and drives `AppLoop::tick`.
//
//=========================================================================

pub mod app_loop;
pub mod clock;
pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod resources;
pub mod scene;
pub mod ui;

//=== Re-exports ==========================================================

pub use app_loop::{AppLoop, TickControl};
pub use clock::TickClock;
pub use scene::{ControlSignal, Scene, SceneKey, SceneManager};
