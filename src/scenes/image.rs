//=========================================================================
// Image Scene
//=========================================================================
//
// Shows one image, panned with the arrow keys. Escape goes back.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{ImageData, Surface};
use crate::core::resources::ResourceCache;
use crate::core::scene::{ControlSignal, Scene, SceneKey};

/// Pixels moved per arrow key press.
pub const PAN_STEP: i32 = 10;

//=== ImageScene ==========================================================

pub struct ImageScene<S: SceneKey> {
    image: Option<Arc<ImageData>>,
    position: (i32, i32),
    back: S,
}

impl<S: SceneKey> ImageScene<S> {
    /// Looks up `name` and centers it on a `screen`-sized surface.
    ///
    /// A missing image is reported once by the cache; the scene then draws
    /// nothing but still handles input.
    pub fn new(resources: &ResourceCache, name: &str, screen: (u32, u32), back: S) -> Self {
        let image = resources.image(name).ok();
        let position = match &image {
            Some(image) => (
                (screen.0 as i32 - image.width() as i32) / 2,
                (screen.1 as i32 - image.height() as i32) / 2,
            ),
            None => (0, 0),
        };

        Self {
            image,
            position,
            back,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    /// Top-left corner of the image in surface pixels.
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

impl<S: SceneKey> Scene<S> for ImageScene<S> {
    fn on_enter(&mut self) {
        debug!("Image scene entered at {:?}", self.position);
    }

    fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<S> {
        let InputEvent::KeyDown { key, .. } = *event else {
            return ControlSignal::Continue;
        };

        let (x, y) = &mut self.position;
        match key {
            KeyCode::ArrowLeft => *x -= PAN_STEP,
            KeyCode::ArrowRight => *x += PAN_STEP,
            KeyCode::ArrowUp => *y -= PAN_STEP,
            KeyCode::ArrowDown => *y += PAN_STEP,
            KeyCode::Escape => return ControlSignal::TransitionTo(self.back),
            _ => {}
        }
        ControlSignal::Continue
    }

    fn update(&mut self) {}

    fn render(&self, surface: &mut dyn Surface) {
        if let Some(image) = &self.image {
            surface.blit(image, self.position.0, self.position.1);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
