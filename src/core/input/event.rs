//=========================================================================
// Input Event Types
//
// Defines the engine-side representation of discrete input events.
//
// This module abstracts away platform-specific input (Winit) into a
// small, portable event vocabulary consumed by scenes and widgets.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputProcessor (platform)
//         ↓
//    InputEvent (this module)
//         ↓
//    AppLoop → active Scene → Widgets
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// `Left` is the primary button: it drives widget hover/press/click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons).
    Other,
}

impl MouseButton {
    /// Returns `true` for the button that activates widgets.
    #[inline]
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Left)
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Only the keys the shell reacts to are named; everything else arrives
/// as `Unidentified` and is dropped by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys (pan / selection)
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Return/Enter key (activate selection)
    Enter,

    /// Escape key (back to menu)
    Escape,

    Space,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left/right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== InputEvent ==========================================================

/// One discrete input event, delivered to the active scene in arrival order.
///
/// Pointer coordinates are in surface space (pixels, top-left origin).
/// Button events carry the cursor position at the time of the press or
/// release so widgets can be hit-tested without extra state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Mouse cursor moved to a new position.
    MouseMoved { x: f32, y: f32 },

    /// Mouse button pressed at `(x, y)`.
    MouseButtonDown {
        button: MouseButton,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    /// Mouse button released at `(x, y)`.
    MouseButtonUp {
        button: MouseButton,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    /// The window (or OS) asked the application to close.
    CloseRequested,
}

impl InputEvent {
    /// Shorthand for an unmodified key press.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for an unmodified button press at `(x, y)`.
    pub fn mouse_down(button: MouseButton, x: f32, y: f32) -> Self {
        Self::MouseButtonDown {
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for an unmodified button release at `(x, y)`.
    pub fn mouse_up(button: MouseButton, x: f32, y: f32) -> Self {
        Self::MouseButtonUp {
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the pointer position carried by this event, if any.
    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        match *self {
            Self::MouseMoved { x, y }
            | Self::MouseButtonDown { x, y, .. }
            | Self::MouseButtonUp { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// Returns `true` for pointer motion (coalescable) events.
    #[inline]
    pub fn is_pointer_motion(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
