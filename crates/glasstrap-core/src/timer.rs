#![forbid(unsafe_code)]

//! Host-driven one-shot timer queue.
//!
//! The widget never sleeps or spawns. The host advances a monotonic clock
//! explicitly and drains whatever continuations came due, which keeps every
//! delay deterministic under test.
//!
//! # Invariants
//!
//! 1. Due entries drain in deadline order; ties drain in scheduling order.
//! 2. Every scheduled entry fires exactly once. There is no cancellation; the
//!    consumer re-validates state when a continuation fires.
//! 3. The clock never goes backwards.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// One-shot timers over a deterministic clock.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending entry.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Schedule `payload` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) {
        let entry = Entry {
            deadline: self.now.saturating_add(delay),
            seq: self.next_seq,
            payload,
        };
        self.next_seq += 1;
        self.pending.push(Reverse(entry));
    }

    /// Advance the clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Move the clock to `now`. Earlier values are ignored.
    pub fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Pop every entry whose deadline has passed, in firing order.
    pub fn drain_due(&mut self) -> Vec<T> {
        let mut due = Vec::new();
        while self
            .pending
            .peek()
            .is_some_and(|Reverse(entry)| entry.deadline <= self.now)
        {
            if let Some(Reverse(entry)) = self.pending.pop() {
                due.push(entry.payload);
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_250: Duration = Duration::from_millis(250);
    const MS_400: Duration = Duration::from_millis(400);

    #[test]
    fn nothing_fires_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(MS_400, "arm");
        q.advance(Duration::from_millis(399));
        assert!(q.drain_due().is_empty());
        q.advance(Duration::from_millis(1));
        assert_eq!(q.drain_due(), vec!["arm"]);
        assert!(q.is_empty());
    }

    #[test]
    fn drains_in_deadline_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(MS_400, 1);
        q.schedule(MS_250, 2);
        q.schedule(MS_400, 3);
        q.advance(Duration::from_secs(1));
        assert_eq!(q.drain_due(), vec![2, 1, 3]);
    }

    #[test]
    fn delays_are_relative_to_schedule_time() {
        let mut q = TimerQueue::new();
        q.advance(Duration::from_millis(100));
        q.schedule(MS_250, ());
        assert_eq!(q.next_deadline(), Some(Duration::from_millis(350)));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<()> = TimerQueue::new();
        q.set_now(Duration::from_millis(500));
        q.set_now(Duration::from_millis(100));
        assert_eq!(q.now(), Duration::from_millis(500));
    }

    #[test]
    fn overlapping_schedules_all_fire() {
        let mut q = TimerQueue::new();
        q.schedule(MS_400, "first");
        q.advance(Duration::from_millis(200));
        q.schedule(MS_400, "second");
        q.advance(Duration::from_millis(200));
        assert_eq!(q.drain_due(), vec!["first"]);
        q.advance(Duration::from_millis(200));
        assert_eq!(q.drain_due(), vec!["second"]);
    }
}
