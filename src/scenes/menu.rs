//=========================================================================
// Menu Scene
//=========================================================================
//
// Vertical list of buttons with keyboard selection.
//
// Input:
//   pointer       → buttons (hover also moves the selection)
//   ArrowDown/Up  → selection wraps around
//   Enter         → activates the selected button
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::{Color, Rect, Surface};
use crate::core::resources::ResourceCache;
use crate::core::scene::{ControlSignal, Scene, SceneKey};
use crate::core::ui::{Button, Widget};

//=== Layout ==============================================================

const BUTTON_SIZE: (f32, f32) = (240.0, 50.0);
const BUTTON_SPACING: f32 = 70.0;
const SELECTION_COLOR: Color = Color::rgb(255, 215, 0);
const SELECTION_MARGIN: f32 = 4.0;

//=== MenuScene ===========================================================

pub struct MenuScene<S: SceneKey> {
    buttons: Vec<Button<S>>,
    selected: usize,
}

impl<S: SceneKey> MenuScene<S> {
    /// Lays out one button per option, centered on the screen.
    pub fn new<L: Into<String>>(
        options: Vec<(L, ControlSignal<S>)>,
        resources: &ResourceCache,
        font: &str,
        font_size: u32,
        screen: (u32, u32),
    ) -> Self {
        let count = options.len() as f32;
        let cx = screen.0 as f32 / 2.0;
        let top = screen.1 as f32 / 2.0 - (count - 1.0) * BUTTON_SPACING / 2.0;

        let buttons = options
            .into_iter()
            .enumerate()
            .map(|(i, (label, signal))| {
                let cy = top + i as f32 * BUTTON_SPACING;
                Button::new(label, resources, font, font_size, (cx, cy), BUTTON_SIZE, move || signal)
            })
            .collect();

        Self {
            buttons,
            selected: 0,
        }
    }

    /// Index of the keyboard-selected option.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buttons.iter().map(Button::text).collect()
    }

    pub fn buttons(&self) -> &[Button<S>] {
        &self.buttons
    }

    fn handle_key(&mut self, key: KeyCode) -> ControlSignal<S> {
        let count = self.buttons.len();
        if count == 0 {
            return ControlSignal::Continue;
        }

        match key {
            KeyCode::ArrowDown => self.selected = (self.selected + 1) % count,
            KeyCode::ArrowUp => self.selected = (self.selected + count - 1) % count,
            KeyCode::Enter => {
                debug!("Menu option '{}' activated", self.buttons[self.selected].text());
                return self.buttons[self.selected].activate();
            }
            _ => {}
        }
        ControlSignal::Continue
    }
}

impl<S: SceneKey> Scene<S> for MenuScene<S> {
    fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<S> {
        let mut result = ControlSignal::Continue;

        // Every button sees the event so hover and press state stay in
        // sync; the first non-Continue answer is kept.
        for (i, button) in self.buttons.iter_mut().enumerate() {
            let signal = button.handle_event(event);

            if event.is_pointer_motion() && button.is_hovered() {
                self.selected = i;
            }
            if result.is_continue() {
                result = signal;
            }
        }

        if !result.is_continue() {
            return result;
        }

        match *event {
            InputEvent::KeyDown { key, .. } => self.handle_key(key),
            _ => ControlSignal::Continue,
        }
    }

    fn update(&mut self) {}

    fn render(&self, surface: &mut dyn Surface) {
        for button in &self.buttons {
            button.draw(surface);
        }

        if let Some(button) = self.buttons.get(self.selected) {
            let r = button.rect();
            let outline = Rect::new(
                r.x - SELECTION_MARGIN,
                r.y - SELECTION_MARGIN,
                r.w + 2.0 * SELECTION_MARGIN,
                r.h + 2.0 * SELECTION_MARGIN,
            );
            surface.stroke_rect(outline, SELECTION_COLOR, 2.0);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;
    use crate::core::render::testing::{DrawCall, RecordingSurface};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        Image,
        Credits,
    }

    impl SceneKey for Key {}

    /// Three options on an 800x600 screen: centers at y = 230, 300, 370.
    fn menu() -> MenuScene<Key> {
        MenuScene::new(
            vec![
                ("Show image", ControlSignal::TransitionTo(Key::Image)),
                ("Credits", ControlSignal::TransitionTo(Key::Credits)),
                ("Quit", ControlSignal::Quit),
            ],
            &ResourceCache::empty(24),
            "gameon",
            24,
            (800, 600),
        )
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::key_down(code)
    }

    #[test]
    fn lays_out_buttons_centered() {
        let menu = menu();
        assert_eq!(menu.labels(), vec!["Show image", "Credits", "Quit"]);

        let centers: Vec<_> = menu.buttons().iter().map(|b| b.rect().center()).collect();
        assert_eq!(centers, vec![(400.0, 230.0), (400.0, 300.0), (400.0, 370.0)]);
    }

    #[test]
    fn arrows_wrap_selection() {
        let mut menu = menu();

        menu.handle_event(&key(KeyCode::ArrowUp));
        assert_eq!(menu.selected(), 2);

        menu.handle_event(&key(KeyCode::ArrowDown));
        assert_eq!(menu.selected(), 0);

        menu.handle_event(&key(KeyCode::ArrowDown));
        menu.handle_event(&key(KeyCode::ArrowDown));
        menu.handle_event(&key(KeyCode::ArrowDown));
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn enter_returns_selected_signal() {
        let mut menu = menu();
        assert_eq!(
            menu.handle_event(&key(KeyCode::Enter)),
            ControlSignal::TransitionTo(Key::Image)
        );

        menu.handle_event(&key(KeyCode::ArrowUp));
        assert_eq!(menu.handle_event(&key(KeyCode::Enter)), ControlSignal::Quit);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut menu = menu();
        assert!(menu.handle_event(&key(KeyCode::Space)).is_continue());
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn hover_moves_selection() {
        let mut menu = menu();

        menu.handle_event(&InputEvent::MouseMoved { x: 400.0, y: 370.0 });
        assert_eq!(menu.selected(), 2);

        // Leaving every button keeps the last selection.
        menu.handle_event(&InputEvent::MouseMoved { x: 5.0, y: 5.0 });
        assert_eq!(menu.selected(), 2);
    }

    #[test]
    fn clicking_a_button_returns_its_signal() {
        let mut menu = menu();

        menu.handle_event(&InputEvent::MouseMoved { x: 400.0, y: 300.0 });
        menu.handle_event(&InputEvent::mouse_down(MouseButton::Left, 400.0, 300.0));
        let signal = menu.handle_event(&InputEvent::mouse_up(MouseButton::Left, 400.0, 300.0));

        assert_eq!(signal, ControlSignal::TransitionTo(Key::Credits));
    }

    #[test]
    fn empty_menu_ignores_keys() {
        let mut menu: MenuScene<Key> =
            MenuScene::new(Vec::<(&str, _)>::new(), &ResourceCache::empty(24), "gameon", 24, (100, 100));

        assert!(menu.handle_event(&key(KeyCode::ArrowDown)).is_continue());
        assert!(menu.handle_event(&key(KeyCode::Enter)).is_continue());
    }

    #[test]
    fn render_highlights_selected_button() {
        let mut menu = menu();
        menu.handle_event(&key(KeyCode::ArrowDown));
        let mut surface = RecordingSurface::new(800, 600);

        menu.render(&mut surface);

        let highlight = Rect::new(276.0, 271.0, 248.0, 58.0);
        assert_eq!(
            surface.calls.last(),
            Some(&DrawCall::StrokeRect(highlight, SELECTION_COLOR, 2.0))
        );
        assert_eq!(surface.fills().len(), 3);
    }
}
