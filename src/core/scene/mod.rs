//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and flat-registry scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     └─ current: Option<S>
//
// Flow:
//   handle_event() → ControlSignal → TransitionQueue
//   process_transitions() → on_exit(old) → on_enter(new)
//   update() / render() on the current scene only
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::Surface;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{ControlSignal, SceneError, SceneKey, SceneManager};
pub use transition_queue::TransitionQueue;

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks, input handling, update and
/// render.
///
/// Scenes are registered in the [`SceneManager`] and exactly one is active
/// at a time. Each scene keeps its own state between activations.
///
/// # Minimal Implementation
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct MyScene;
///
/// impl Scene<GameScene> for MyScene {
///     fn handle_event(&mut self, _event: &InputEvent) -> ControlSignal<GameScene> {
///         ControlSignal::Continue
///     }
///
///     fn update(&mut self) {}
///
///     fn render(&self, _surface: &mut dyn Surface) {}
/// }
/// ```
pub trait Scene<S: SceneKey> {
    /// Called when the scene becomes the active scene.
    fn on_enter(&mut self) {}

    /// Called when another scene replaces this one.
    fn on_exit(&mut self) {}

    /// Reacts to one input event and reports what the loop should do next.
    fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<S>;

    /// Called once per tick after all events have been handled.
    fn update(&mut self);

    /// Draws the scene. Must not change scene state.
    fn render(&self, surface: &mut dyn Surface);
}
