//=========================================================================
// Input Buffer
//
// Collects engine input events between two ticks, preserving arrival
// order. Acts as a transient event aggregator between the winit callbacks
// and `AppLoop::tick`.
//
// Responsibilities:
// - Store incoming events in order
// - Coalesce consecutive pointer moves (only the latest position matters)
// - Hand the batch over via `drain()`
//
// Notes:
// Moves are only merged when adjacent. A move that precedes a button
// event is kept so widgets see hover before press.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a typical frame so steady-state pushes don't grow.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Push -------------------------------------------------------------
    //
    // Appends an event. A pointer move directly following another pointer
    // move replaces it in place.
    //
    pub fn push(&mut self, event: InputEvent) {
        if event.is_pointer_motion() {
            if let Some(last) = self.events.last_mut() {
                if last.is_pointer_motion() {
                    *last = event;
                    return;
                }
            }
        }
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns all events in arrival order and leaves the buffer empty
    // with its capacity intact.
    //
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    //--- Utilities --------------------------------------------------------
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
