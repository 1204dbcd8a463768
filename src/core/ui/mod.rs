//=========================================================================
// UI Widgets
//=========================================================================
//
// Small set of stateful widgets owned by scenes.
//
// Widgets see the same `InputEvent`s as their scene and answer with a
// `ControlSignal`. The scene forwards the first non-`Continue` answer to
// the application loop.
//
//=========================================================================

//=== Module Declarations =================================================

mod button;

//=== Public API ==========================================================

pub use button::{Button, ButtonColors};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::Surface;
use crate::core::scene::{ControlSignal, SceneKey};

//=== Widget Trait ========================================================

/// Interactive element drawn on top of a scene.
pub trait Widget<S: SceneKey> {
    /// Updates widget state from one event.
    fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<S>;

    /// Draws the widget. Never mutates state.
    fn draw(&self, surface: &mut dyn Surface);
}
