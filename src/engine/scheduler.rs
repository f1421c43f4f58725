//! Pending delayed completions
//!
//! Entries are ordered by due time, then by submission sequence, so
//! completions apply in the order their delays elapse and ties keep
//! submission order.

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<(Duration, u64), T>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `payload` to complete `delay` after `now`; returns the due time
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> Duration {
        let due = now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), payload);
        due
    }

    /// Remove and return every entry due at or before `now`, in order
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let later = self.queue.split_off(&(now, u64::MAX));
        let due = std::mem::replace(&mut self.queue, later);
        due.into_values().collect()
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Drop everything pending; returns how many entries were discarded
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
