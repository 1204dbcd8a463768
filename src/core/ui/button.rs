//=========================================================================
// Button
//=========================================================================
//
// Clickable rectangle with a pre-rendered text label.
//
// State machine (primary button only):
//   MouseMoved      → hovered = rect contains pointer
//   ButtonDown      → pressed = hovered
//   ButtonUp        → pressed && hovered ? callback() : Continue
//                     pressed cleared either way
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::Widget;
use crate::core::input::InputEvent;
use crate::core::render::text::rasterize_text;
use crate::core::render::{Color, ImageData, Rect, Surface};
use crate::core::resources::ResourceCache;
use crate::core::scene::{ControlSignal, SceneKey};

/// Outline drawn around every button.
const BORDER_WIDTH: f32 = 2.0;

//=== ButtonColors ========================================================

/// Fill colors for each visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: Color::rgb(100, 100, 100),
            hovered: Color::rgb(150, 150, 150),
            pressed: Color::rgb(200, 200, 200),
        }
    }
}

//=== Button ==============================================================

type Callback<S> = Box<dyn FnMut() -> ControlSignal<S>>;

pub struct Button<S: SceneKey> {
    text: String,
    rect: Rect,
    colors: ButtonColors,
    label: Option<ImageData>,
    callback: Callback<S>,
    hovered: bool,
    pressed: bool,
}

impl<S: SceneKey> Button<S> {
    /// Builds a button centered on `center` with the given `size`.
    ///
    /// The label is rasterized once from `font` at `font_size`. When the
    /// font cannot be resolved the button draws without a label.
    pub fn new<F>(
        text: impl Into<String>,
        resources: &ResourceCache,
        font: &str,
        font_size: u32,
        center: (f32, f32),
        size: (f32, f32),
        callback: F,
    ) -> Self
    where
        F: FnMut() -> ControlSignal<S> + 'static,
    {
        let text = text.into();

        // A failed lookup is already logged by the cache.
        let label = resources
            .font(font, font_size)
            .ok()
            .and_then(|font| rasterize_text(&font, &text, Color::WHITE));

        Self {
            text,
            rect: Rect::from_center(center.0, center.1, size.0, size.1),
            colors: ButtonColors::default(),
            label,
            callback: Box::new(callback),
            hovered: false,
            pressed: false,
        }
    }

    /// Replaces the default color table.
    pub fn with_colors(mut self, colors: ButtonColors) -> Self {
        self.colors = colors;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Fill color for the current state: pressed, then hovered, then normal.
    pub fn fill_color(&self) -> Color {
        if self.pressed {
            self.colors.pressed
        } else if self.hovered {
            self.colors.hovered
        } else {
            self.colors.normal
        }
    }

    /// Invokes the callback directly, bypassing pointer state.
    pub fn activate(&mut self) -> ControlSignal<S> {
        (self.callback)()
    }
}

impl<S: SceneKey> Widget<S> for Button<S> {
    fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<S> {
        match *event {
            InputEvent::MouseMoved { x, y } => {
                self.hovered = self.rect.contains(x, y);
            }
            InputEvent::MouseButtonDown { button, .. } if button.is_primary() => {
                if self.hovered {
                    self.pressed = true;
                }
            }
            InputEvent::MouseButtonUp { button, .. } if button.is_primary() => {
                let fire = self.pressed && self.hovered;
                self.pressed = false;
                if fire {
                    return self.activate();
                }
            }
            _ => {}
        }

        ControlSignal::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, self.fill_color());
        surface.stroke_rect(self.rect, Color::WHITE, BORDER_WIDTH);

        if let Some(label) = &self.label {
            let (cx, cy) = self.rect.center();
            let x = (cx - label.width() as f32 / 2.0).round() as i32;
            let y = (cy - label.height() as f32 / 2.0).round() as i32;
            surface.blit(label, x, y);
        }
    }
}

impl<S: SceneKey> fmt::Debug for Button<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("rect", &self.rect)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
