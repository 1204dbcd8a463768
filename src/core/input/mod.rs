//=========================================================================
// Input
//
// Engine-side input vocabulary shared by the platform layer, scenes and
// widgets. The platform converts Winit events into `InputEvent`s; the
// application loop hands them, in order, to the active scene.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;

//=== Public API ==========================================================
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
