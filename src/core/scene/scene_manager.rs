//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the active key, and lifecycle.
//
// Scenes are stored in a HashMap by key and the manager tracks which one
// is current. Scenes keep their state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, error, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{Scene, TransitionQueue};

//=== Control Signal ======================================================

/// Outcome of handling one input event.
///
/// Returned by scenes and widgets. `TransitionTo` is queued and applied at
/// the tick boundary; `Quit` ends the loop on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal<K: SceneKey> {
    /// Nothing to do.
    Continue,

    /// Stop the application loop.
    Quit,

    /// Make `K` the active scene.
    TransitionTo(K),
}

impl<K: SceneKey> ControlSignal<K> {
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

// Manual impl: a derive would require `K: Default`.
impl<K: SceneKey> Default for ControlSignal<K> {
    fn default() -> Self {
        Self::Continue
    }
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes in the SceneManager's HashMap.
/// Typically implemented by application-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Scene Error =========================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The requested key has no registered scene.
    #[error("scene {0} is not registered")]
    NotFound(String),
}

//=== Scene Manager =======================================================

/// Flat scene registry with a single active scene.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    current: Option<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes and no active key.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            current: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene under `key`, replacing any previous one.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and makes it the current scene.
    ///
    /// `on_enter` is not called here; [`Self::start`] does that once the
    /// engine begins running.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);

        if let Some(previous) = self.current.replace(key) {
            warn!("Default scene {:?} replaced by {:?}", previous, key);
        } else {
            debug!("Registered scene {:?} as default", key);
        }
    }

    /// Calls `on_enter` on the initial scene.
    pub fn start(&mut self) {
        let Some(initial) = self.current else {
            warn!("Scene manager started without a default scene");
            return;
        };

        debug!("Starting scene manager with initial scene: {:?}", initial);
        match self.scenes.get_mut(&initial) {
            Some(scene) => scene.on_enter(),
            None => warn!("Initial scene {:?} not registered", initial),
        }
    }

    //--- Switching --------------------------------------------------------

    /// Makes `key` the active scene.
    ///
    /// An unregistered key is logged and leaves the current scene untouched.
    pub fn switch_scene(&mut self, key: S) -> Result<(), SceneError> {
        if !self.scenes.contains_key(&key) {
            let err = SceneError::NotFound(format!("{:?}", key));
            error!("{}", err);
            return Err(err);
        }

        if let Some(old) = self.current.and_then(|old| self.scenes.get_mut(&old)) {
            old.on_exit();
        }

        debug!("Switching scene {:?} -> {:?}", self.current, key);
        self.current = Some(key);

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_enter();
        }
        Ok(())
    }

    /// Applies queued transitions in FIFO order and returns the rejected
    /// ones.
    ///
    /// A rejected key leaves the previous scene active. Each rejection has
    /// already been logged by [`Self::switch_scene`].
    pub fn process_transitions(&mut self, queue: &mut TransitionQueue<S>) -> Vec<SceneError> {
        queue
            .drain()
            .filter_map(|key| self.switch_scene(key).err())
            .collect()
    }

    //--- Queries ----------------------------------------------------------

    pub fn current_key(&self) -> Option<S> {
        self.current
    }

    pub fn current_scene(&self) -> Option<&dyn Scene<S>> {
        let key = self.current?;
        self.scenes.get(&key).map(|scene| scene.as_ref())
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut (dyn Scene<S> + 'static)> {
        let key = self.current?;
        self.scenes.get_mut(&key).map(|scene| scene.as_mut())
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::logging::testing::capture_logs;
    use crate::core::render::Surface;
    use log::Level;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        C,
    }

    impl SceneKey for TestScene {}

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        log: Log,
    }

    impl Scene<TestScene> for Probe {
        fn on_enter(&mut self) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn on_exit(&mut self) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }

        fn handle_event(&mut self, _event: &InputEvent) -> ControlSignal<TestScene> {
            ControlSignal::Continue
        }

        fn update(&mut self) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn render(&self, _surface: &mut dyn Surface) {}
    }

    fn manager(log: &Log) -> SceneManager<TestScene> {
        let mut manager = SceneManager::new();
        manager.register_default(TestScene::A, Probe { name: "A", log: Rc::clone(log) });
        manager.register_scene(TestScene::B, Probe { name: "B", log: Rc::clone(log) });
        manager
    }

    //--- ControlSignal Tests ----------------------------------------------

    #[test]
    fn signal_default_is_continue() {
        let signal: ControlSignal<TestScene> = ControlSignal::default();
        assert!(signal.is_continue());
        assert!(!ControlSignal::TransitionTo(TestScene::A).is_continue());
    }

    //--- SceneManager Tests -----------------------------------------------

    #[test]
    fn empty_manager_has_no_current_scene() {
        let mut manager: SceneManager<TestScene> = SceneManager::new();
        assert!(manager.current_scene().is_none());
        assert!(manager.current_scene_mut().is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn start_enters_default_scene() {
        let log = Log::default();
        let mut manager = manager(&log);
        manager.start();

        assert_eq!(manager.current_key(), Some(TestScene::A));
        assert_eq!(*log.borrow(), vec!["enter A"]);
    }

    #[test]
    fn switch_runs_exit_then_enter() {
        let log = Log::default();
        let mut manager = manager(&log);

        manager.switch_scene(TestScene::B).unwrap();

        assert_eq!(manager.current_key(), Some(TestScene::B));
        assert_eq!(*log.borrow(), vec!["exit A", "enter B"]);
    }

    #[test]
    fn switch_to_unregistered_keeps_current() {
        let log = Log::default();
        let mut manager = manager(&log);

        let mut result = Ok(());
        let records = capture_logs(|| result = manager.switch_scene(TestScene::C));

        assert_eq!(result, Err(SceneError::NotFound("C".into())));
        assert_eq!(records, vec![(Level::Error, "scene C is not registered".to_string())]);
        assert_eq!(manager.current_key(), Some(TestScene::A));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn transitions_apply_in_fifo_order() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut queue = TransitionQueue::new();
        queue.push(TestScene::B);
        queue.push(TestScene::C);
        queue.push(TestScene::A);

        let rejected = manager.process_transitions(&mut queue);

        assert_eq!(rejected, vec![SceneError::NotFound("C".into())]);
        assert!(queue.is_empty());
        assert_eq!(manager.current_key(), Some(TestScene::A));
        assert_eq!(*log.borrow(), vec!["exit A", "enter B", "exit B", "enter A"]);
    }

    #[test]
    fn current_scene_mut_reaches_active_scene_only() {
        let log = Log::default();
        let mut manager = manager(&log);

        manager.current_scene_mut().unwrap().update();

        assert_eq!(*log.borrow(), vec!["update A"]);
    }
}
