//! Deadline queue for delayed callbacks.
//!
//! Entries are stored in a min-heap keyed by `(deadline, insertion_order)`.
//! Earlier deadlines pop first; equal deadlines pop in FIFO order. Every
//! scheduled entry gets a [`TimerId`] that can later cancel it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct Entry<E> {
    event: E,
    deadline: Instant,
    /// Monotonic counter: breaks deadline ties and identifies the entry.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A queue of events waiting for their deadline.
pub struct TimerQueue<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> TimerQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule `event` to become due `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) -> TimerId {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            event,
            deadline: now + delay,
            seq,
        }));
        TimerId(seq)
    }

    /// Remove the entry with the given id. Returns whether it was pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.heap.len();
        let old_heap = std::mem::take(&mut self.heap);
        self.heap = old_heap
            .into_iter()
            .filter(|Reverse(entry)| entry.seq != id.0)
            .collect();
        self.heap.len() != before
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Pop the earliest entry whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, E)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap
            .pop()
            .map(|Reverse(entry)| (TimerId(entry.seq), entry.event))
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pops_in_deadline_order() {
        let now = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(now, ms(30), "c");
        q.schedule(now, ms(10), "a");
        q.schedule(now, ms(20), "b");

        let later = now + ms(100);
        assert_eq!(q.pop_due(later).map(|(_, e)| e), Some("a"));
        assert_eq!(q.pop_due(later).map(|(_, e)| e), Some("b"));
        assert_eq!(q.pop_due(later).map(|(_, e)| e), Some("c"));
        assert_eq!(q.pop_due(later), None);
    }

    #[test]
    fn equal_deadlines_are_fifo() {
        let now = Instant::now();
        let mut q = TimerQueue::new();
        let first = q.schedule(now, ms(5), 1);
        let second = q.schedule(now, ms(5), 2);
        assert!(first < second);
        assert_eq!(q.pop_due(now + ms(5)), Some((first, 1)));
        assert_eq!(q.pop_due(now + ms(5)), Some((second, 2)));
    }

    #[test]
    fn nothing_is_due_early() {
        let now = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(now, ms(50), ());
        assert_eq!(q.next_deadline(), Some(now + ms(50)));
        assert!(q.pop_due(now + ms(49)).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cancel_removes_only_that_entry() {
        let now = Instant::now();
        let mut q = TimerQueue::new();
        let a = q.schedule(now, ms(1), 'a');
        q.schedule(now, ms(2), 'b');
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.pop_due(now + ms(10)).map(|(_, e)| e), Some('b'));
        assert!(q.is_empty());
    }
}
