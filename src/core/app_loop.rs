//=========================================================================
// Application Loop
//=========================================================================
//
// One fixed tick of the shell, independent of any window system.
//
// Tick:
//   1. no active scene            → Exit
//   2. drain events in order
//        CloseRequested           → Exit
//        scene → Quit             → Exit (no update, no render)
//        scene → TransitionTo(k)  → queue k
//   3. apply queued transitions (FIFO)
//   4. update the active scene once
//   5. clear, background, scene render
//
// The platform layer owns pacing and presentation and calls `tick` once
// per deadline.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::{Color, ImageData, Rect, Surface};
use crate::core::scene::{ControlSignal, SceneKey, SceneManager, TransitionQueue};

//=== TickControl =========================================================

/// Whether the host should keep running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== AppLoop =============================================================

pub struct AppLoop<S: SceneKey> {
    scenes: SceneManager<S>,
    transitions: TransitionQueue<S>,
    background: Option<Arc<ImageData>>,
    clear_color: Color,
    started: bool,
}

impl<S: SceneKey> AppLoop<S> {
    pub fn new(scenes: SceneManager<S>) -> Self {
        Self {
            scenes,
            transitions: TransitionQueue::new(),
            background: None,
            clear_color: Color::BLACK,
            started: false,
        }
    }

    /// Image stretched over the whole surface before each scene renders.
    pub fn with_background(mut self, background: Option<Arc<ImageData>>) -> Self {
        self.background = background;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn scenes(&self) -> &SceneManager<S> {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager<S> {
        &mut self.scenes
    }

    pub fn active_scene(&self) -> Option<S> {
        self.scenes.current_key()
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one tick over `events` and draws the frame into `surface`.
    ///
    /// The first call also enters the initial scene.
    pub fn tick<I>(&mut self, events: I, surface: &mut dyn Surface) -> TickControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if !self.started {
            self.started = true;
            self.scenes.start();
        }

        if self.scenes.current_scene().is_none() {
            info!("No active scene, stopping");
            return TickControl::Exit;
        }

        //--- 1. Dispatch events -------------------------------------------
        for event in events {
            if let TickControl::Exit = self.dispatch(&event) {
                self.transitions.clear();
                return TickControl::Exit;
            }
        }

        //--- 2. Apply transitions at the tick boundary -----------------------
        if !self.transitions.is_empty() {
            let rejected = self.scenes.process_transitions(&mut self.transitions);
            if !rejected.is_empty() {
                debug!(
                    "{} queued transition(s) rejected, staying on {:?}",
                    rejected.len(),
                    self.scenes.current_key()
                );
            }
        }

        //--- 3. Update and render -------------------------------------------
        let Some(scene) = self.scenes.current_scene_mut() else {
            info!("No active scene, stopping");
            return TickControl::Exit;
        };
        scene.update();

        self.render(surface);
        TickControl::Continue
    }

    fn dispatch(&mut self, event: &InputEvent) -> TickControl {
        if let InputEvent::CloseRequested = event {
            info!("Close requested, stopping");
            return TickControl::Exit;
        }

        let Some(scene) = self.scenes.current_scene_mut() else {
            return TickControl::Exit;
        };

        match scene.handle_event(event) {
            ControlSignal::Continue => {}
            ControlSignal::Quit => {
                info!("Quit requested by {:?}", self.scenes.current_key());
                return TickControl::Exit;
            }
            ControlSignal::TransitionTo(key) => {
                debug!("Transition to {:?} queued", key);
                self.transitions.push(key);
            }
        }

        trace!("Handled {:?}", event);
        TickControl::Continue
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(self.clear_color);

        if let Some(background) = &self.background {
            let (w, h) = surface.size();
            surface.blit_scaled(background, Rect::new(0.0, 0.0, w as f32, h as f32));
        }

        if let Some(scene) = self.scenes.current_scene() {
            scene.render(surface);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::logging::testing::capture_logs;
    use crate::core::render::testing::{solid_image, DrawCall, RecordingSurface};
    use crate::core::scene::Scene;
    use log::Level;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Key {
        A,
        B,
        Missing,
    }

    impl SceneKey for Key {}

    type Log = Rc<RefCell<Vec<String>>>;

    /// Scene that answers Space with a fixed signal and records calls.
    struct Scripted {
        name: &'static str,
        on_space: ControlSignal<Key>,
        log: Log,
    }

    impl Scene<Key> for Scripted {
        fn on_enter(&mut self) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn handle_event(&mut self, event: &InputEvent) -> ControlSignal<Key> {
            self.log.borrow_mut().push(format!("event {}", self.name));
            match event {
                InputEvent::KeyDown { key: KeyCode::Space, .. } => self.on_space,
                _ => ControlSignal::Continue,
            }
        }

        fn update(&mut self) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn render(&self, surface: &mut dyn Surface) {
            self.log.borrow_mut().push(format!("render {}", self.name));
            surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        }
    }

    fn app(a_space: ControlSignal<Key>, log: &Log) -> AppLoop<Key> {
        let mut scenes = SceneManager::new();
        scenes.register_default(
            Key::A,
            Scripted { name: "A", on_space: a_space, log: Rc::clone(log) },
        );
        scenes.register_scene(
            Key::B,
            Scripted { name: "B", on_space: ControlSignal::Quit, log: Rc::clone(log) },
        );
        AppLoop::new(scenes)
    }

    fn space() -> InputEvent {
        InputEvent::key_down(KeyCode::Space)
    }

    #[test]
    fn empty_registry_exits() {
        let mut app: AppLoop<Key> = AppLoop::new(SceneManager::new());
        let mut surface = RecordingSurface::new(10, 10);

        assert_eq!(app.tick(Vec::new(), &mut surface), TickControl::Exit);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn idle_tick_updates_and_renders() {
        let log = Log::default();
        let mut app = app(ControlSignal::Continue, &log);
        let mut surface = RecordingSurface::new(10, 10);

        assert_eq!(app.tick(Vec::new(), &mut surface), TickControl::Continue);
        assert_eq!(*log.borrow(), vec!["enter A", "update A", "render A"]);
        assert_eq!(surface.calls[0], DrawCall::Clear(Color::BLACK));
    }

    #[test]
    fn close_request_exits_before_scene_sees_it() {
        let log = Log::default();
        let mut app = app(ControlSignal::Continue, &log);
        let mut surface = RecordingSurface::new(10, 10);

        let control = app.tick(vec![InputEvent::CloseRequested, space()], &mut surface);

        assert_eq!(control, TickControl::Exit);
        assert_eq!(*log.borrow(), vec!["enter A"]);
    }

    #[test]
    fn quit_exits_without_update_or_render() {
        let log = Log::default();
        let mut app = app(ControlSignal::Quit, &log);
        let mut surface = RecordingSurface::new(10, 10);

        let control = app.tick(vec![space(), space()], &mut surface);

        assert_eq!(control, TickControl::Exit);
        // The second event is never delivered.
        assert_eq!(*log.borrow(), vec!["enter A", "event A"]);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn transition_applies_before_update() {
        let log = Log::default();
        let mut app = app(ControlSignal::TransitionTo(Key::B), &log);
        let mut surface = RecordingSurface::new(10, 10);

        let control = app.tick(vec![space()], &mut surface);

        assert_eq!(control, TickControl::Continue);
        assert_eq!(app.active_scene(), Some(Key::B));
        assert_eq!(
            *log.borrow(),
            vec!["enter A", "event A", "enter B", "update B", "render B"]
        );
    }

    #[test]
    fn events_after_transition_still_reach_old_scene() {
        let log = Log::default();
        let mut app = app(ControlSignal::TransitionTo(Key::B), &log);
        let mut surface = RecordingSurface::new(10, 10);

        app.tick(vec![space(), InputEvent::key_down(KeyCode::Tab)], &mut surface);

        let log = log.borrow();
        assert_eq!(log[1..3], ["event A", "event A"]);
        assert_eq!(app.active_scene(), Some(Key::B));
    }

    #[test]
    fn unregistered_transition_keeps_current_scene() {
        let log = Log::default();
        let mut app = app(ControlSignal::TransitionTo(Key::Missing), &log);
        let mut surface = RecordingSurface::new(10, 10);

        let control = app.tick(vec![space()], &mut surface);

        assert_eq!(control, TickControl::Continue);
        assert_eq!(app.active_scene(), Some(Key::A));
        assert_eq!(log.borrow().last().map(String::as_str), Some("render A"));
    }

    #[test]
    fn unregistered_transition_is_logged_once() {
        let log = Log::default();
        let mut app = app(ControlSignal::TransitionTo(Key::Missing), &log);
        let mut surface = RecordingSurface::new(10, 10);

        let records = capture_logs(|| {
            app.tick(vec![space()], &mut surface);
        });

        let errors: Vec<_> = records
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .collect();
        assert_eq!(errors.len(), 1, "{records:?}");
        assert_eq!(errors[0].1, "scene Missing is not registered");
        assert_eq!(
            records.iter().filter(|(_, msg)| msg.contains("is not registered")).count(),
            1
        );
    }

    #[test]
    fn background_is_scaled_to_surface() {
        let log = Log::default();
        let mut app = app(ControlSignal::Continue, &log)
            .with_background(Some(Arc::new(solid_image(2, 2))))
            .with_clear_color(Color::rgb(1, 1, 1));
        let mut surface = RecordingSurface::new(64, 48);

        app.tick(Vec::new(), &mut surface);

        assert_eq!(
            surface.calls[..2],
            [
                DrawCall::Clear(Color::rgb(1, 1, 1)),
                DrawCall::BlitScaled { w: 2, h: 2, dest: Rect::new(0.0, 0.0, 64.0, 48.0) },
            ]
        );
    }
}
