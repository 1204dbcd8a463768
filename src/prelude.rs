//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_stage::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, EngineError, InitContext};
pub use crate::core::{AppLoop, TickControl};

// Configuration and resources
pub use crate::core::config::AppConfig;
pub use crate::core::resources::{ResourceCache, ResourceError};

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Drawing
pub use crate::core::render::{Color, ImageData, Rect, Surface};

// Scene system
pub use crate::core::scene::{ControlSignal, Scene, SceneKey, SceneManager};

// Widgets
pub use crate::core::ui::{Button, Widget};
