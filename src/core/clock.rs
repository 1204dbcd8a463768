//=========================================================================
// Tick Clock
//=========================================================================
//
// Fixed-rate deadline scheduler for the application loop.
//
// The host asks `is_due(now)`, runs one tick, then calls `advance(now)`.
// Deadlines step by exactly one frame so pacing does not drift; when the
// loop is more than one frame late the schedule restarts from `now`
// instead of running a burst of catch-up ticks.
//
//=========================================================================

use std::time::{Duration, Instant};

use log::trace;

#[derive(Debug, Clone)]
pub struct TickClock {
    frame: Duration,
    next: Instant,
    ticks: u64,
}

impl TickClock {
    /// Creates a clock whose first tick is due at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `tps` is not a positive finite number.
    pub fn new(tps: f64, start: Instant) -> Self {
        assert!(tps.is_finite() && tps > 0.0, "TPS must be positive, got {}", tps);
        Self {
            frame: Duration::from_secs_f64(1.0 / tps),
            next: start,
            ticks: 0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Instant at which the next tick should run.
    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Records a completed tick and schedules the next deadline.
    pub fn advance(&mut self, now: Instant) {
        self.ticks += 1;
        self.next += self.frame;

        if now > self.next + self.frame {
            trace!(
                "Tick {} ran {:?} late, resynchronizing",
                self.ticks,
                now.duration_since(self.next)
            );
            self.next = now + self.frame;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    #[test]
    fn first_tick_is_due_immediately() {
        let start = Instant::now();
        let clock = TickClock::new(100.0, start);

        assert!(clock.is_due(start));
        assert_eq!(clock.frame_duration(), FRAME);
    }

    #[test]
    fn deadlines_step_by_one_frame() {
        let start = Instant::now();
        let mut clock = TickClock::new(100.0, start);

        clock.advance(start);
        assert_eq!(clock.next_deadline(), start + FRAME);
        assert!(!clock.is_due(start + FRAME / 2));
        assert!(clock.is_due(start + FRAME));

        // Running slightly late keeps the original grid.
        clock.advance(start + FRAME + Duration::from_millis(3));
        assert_eq!(clock.next_deadline(), start + FRAME * 2);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn falling_far_behind_resynchronizes() {
        let start = Instant::now();
        let mut clock = TickClock::new(100.0, start);

        let stalled = start + Duration::from_millis(500);
        clock.advance(stalled);

        assert_eq!(clock.next_deadline(), stalled + FRAME);
        assert!(!clock.is_due(stalled));
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn zero_tps_panics() {
        TickClock::new(0.0, Instant::now());
    }
}
