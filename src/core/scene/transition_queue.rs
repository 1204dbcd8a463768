//=========================================================================
// Transition Queue
//=========================================================================
//
// FIFO of scene keys requested during event handling.
//
// Scenes and widgets return `ControlSignal::TransitionTo`; the application
// loop queues the key here and the scene manager applies the queue at the
// tick boundary, after all events are drained and before `update`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== Transition Queue ====================================================

/// Pending scene switches, applied in arrival order.
#[derive(Debug)]
pub struct TransitionQueue<S: SceneKey> {
    queue: VecDeque<S>,
}

impl<S: SceneKey> TransitionQueue<S> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queues a switch to `key` for the next tick boundary.
    pub fn push(&mut self, key: S) {
        self.queue.push_back(key);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Drains all queued keys, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = S> + '_ {
        self.queue.drain(..)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
