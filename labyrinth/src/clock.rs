//! Wall-clock [`Timer`] for the interactive app.
//!
//! Ticks wait in a [`TimerQueue`]; the app loop wakes up at
//! [`next_deadline`](FrameTimer::next_deadline) and hands due ticks back to
//! the session.

use std::time::{Duration, Instant};

use labyrinth_core::{TimerId, TimerQueue};
use labyrinth_model::{TickId, Timer};

#[derive(Default)]
pub struct FrameTimer {
    queue: TimerQueue<()>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    /// The earliest tick due at `now`, if any.
    pub fn pop_due(&mut self, now: Instant) -> Option<TickId> {
        self.queue.pop_due(now).map(|(TimerId(id), ())| TickId(id))
    }

    fn schedule_at(&mut self, now: Instant, delay: Duration) -> TickId {
        let TimerId(id) = self.queue.schedule(now, delay, ());
        TickId(id)
    }
}

impl Timer for FrameTimer {
    fn schedule(&mut self, delay: Duration) -> TickId {
        self.schedule_at(Instant::now(), delay)
    }

    fn cancel(&mut self, TickId(id): TickId) {
        self.queue.cancel(TimerId(id));
    }
}
