//! Deferred animation ticks.
//!
//! The UI thread never sleeps between frames. The controller files a
//! [`TimerTask`] through [`Scheduler::after`], and the event loop pops due tasks
//! from a [`TimerQueue`] between input polls.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use probsim_core::model::experiment::Experiment;

/// Re-entry point for an animation, tagged with the session that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTask {
    pub experiment: Experiment,
    pub session: u64,
}

pub trait Scheduler {
    fn after(&mut self, delay: Duration, task: TimerTask);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due: Instant,
    seq: u64,
    task: TimerTask,
}

impl Ord for Entry {
    // Reversed so the max-heap yields the earliest deadline, then FIFO.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, due: Instant, task: TimerTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due, seq, task });
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.due)
    }

    /// Time left until the earliest task is due, zero if already overdue.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Removes the earliest task if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerTask> {
        if self.heap.peek()?.due <= now {
            self.heap.pop().map(|entry| entry.task)
        } else {
            None
        }
    }

    /// Removes the earliest task regardless of its deadline.
    pub fn pop_next(&mut self) -> Option<TimerTask> {
        self.heap.pop().map(|entry| entry.task)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay: Duration, task: TimerTask) {
        self.schedule_at(Instant::now() + delay, task);
    }
}
