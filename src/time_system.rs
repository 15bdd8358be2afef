//! Game time and delayed continuations.
//!
//! Timed behavior never uses wall-clock callbacks. Anything that happens
//! "later" is pushed onto a `Scheduler` keyed by game time and popped by the
//! owner's tick once the clock has caught up.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

// =============================================================================
// GAME CLOCK
// =============================================================================

/// Game time clock (in seconds)
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    /// Current game time in seconds (simulation time, not real time)
    pub time: f32,
}

impl GameClock {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    /// Advance by a non-negative delta
    pub fn advance(&mut self, dt: f32) {
        self.advance_to(self.time + dt.max(0.0));
    }

    /// Advance time to the given timestamp
    pub fn advance_to(&mut self, time: f32) {
        debug_assert!(
            time >= self.time,
            "Cannot go backwards in time: {} -> {}",
            self.time,
            time
        );
        self.time = time;
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: f32,
    /// Insertion order; breaks ties between equal due times
    seq: u64,
    item: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (earliest time first)
        other
            .due
            .partial_cmp(&self.due)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of items keyed by the game time they become due
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: BinaryHeap<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `item` to become due at game time `due`
    pub fn schedule(&mut self, due: f32, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due, seq, item });
    }

    /// Due time of the earliest pending item
    pub fn peek_due(&self) -> Option<f32> {
        self.pending.peek().map(|s| s.due)
    }

    /// Pop the earliest item if it is due at `now`
    pub fn pop_due(&mut self, now: f32) -> Option<(f32, T)> {
        if self.peek_due()? > now {
            return None;
        }
        self.pending.pop().map(|s| (s.due, s.item))
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
