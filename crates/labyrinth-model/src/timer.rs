//! The timer port: how a session asks for its next step.
//!
//! A [`Session`](crate::Session) never sleeps. It schedules a tick and
//! waits for the host to hand the [`TickId`] back through
//! [`on_tick`](crate::Session::on_tick).

use std::collections::VecDeque;
use std::time::Duration;

/// Identifies one scheduled tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

/// Something that can deliver a tick after a delay.
pub trait Timer {
    /// Arrange for a tick after `delay` and return its id.
    fn schedule(&mut self, delay: Duration) -> TickId;

    /// Drop a pending tick. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TickId);
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn schedule(&mut self, delay: Duration) -> TickId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, id: TickId) {
        (**self).cancel(id);
    }
}

/// A timer driven by hand: ticks fire in scheduling order when
/// [`fire`](Self::fire) is called, regardless of their delay.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    pending: VecDeque<TickId>,
    next: u64,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending tick.
    pub fn fire(&mut self) -> Option<TickId> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, _delay: Duration) -> TickId {
        let id = TickId(self.next);
        self.next += 1;
        self.pending.push_back(id);
        id
    }

    fn cancel(&mut self, id: TickId) {
        self.pending.retain(|&p| p != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_order_and_cancels() {
        let mut t = ManualTimer::new();
        let a = t.schedule(Duration::from_millis(50));
        let b = t.schedule(Duration::from_millis(10));
        let c = t.schedule(Duration::ZERO);
        assert_ne!(a, b);
        t.cancel(b);
        t.cancel(TickId(99));
        assert_eq!(t.pending(), 2);
        assert_eq!(t.fire(), Some(a));
        assert_eq!(t.fire(), Some(c));
        assert_eq!(t.fire(), None);
    }
}
