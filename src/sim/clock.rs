//! Virtual clock and timer queue
//!
//! Time only moves when the owner advances it. One-shot timers carry a typed
//! event that the owner dispatches; frame subscriptions stay live until cancelled.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer or frame subscription (cancel token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// Monotonic scheduler for one-shot timers and per-frame subscriptions
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    /// (deadline, id); ids increase so equal deadlines pop in scheduling order
    queue: BinaryHeap<Reverse<(Duration, u64)>>,
    /// Live one-shot timers. Cancelled entries stay in `queue` and are skipped on pop.
    pending: HashMap<u64, E>,
    frame_loops: HashSet<u64>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            queue: BinaryHeap::new(),
            pending: HashMap::new(),
            frame_loops: HashSet::new(),
        }
    }

    /// Current time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Schedule `event` to fire once after `delay`
    pub fn after(&mut self, delay: Duration, event: E) -> TimerId {
        let id = self.allocate_id();
        self.queue.push(Reverse((self.now + delay, id)));
        self.pending.insert(id, event);
        TimerId(id)
    }

    /// Register a per-frame subscription, live until cancelled
    pub fn every_frame(&mut self) -> TimerId {
        let id = self.allocate_id();
        self.frame_loops.insert(id);
        TimerId(id)
    }

    /// Cancel a timer or frame subscription. Returns whether it was still live.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id.0).is_some() || self.frame_loops.remove(&id.0)
    }

    /// Whether a timer has yet to fire or a frame subscription is still registered
    pub fn is_active(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id.0) || self.frame_loops.contains(&id.0)
    }

    /// Number of live one-shot timers
    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    /// Number of live frame subscriptions
    pub fn frame_subscriptions(&self) -> usize {
        self.frame_loops.len()
    }

    /// Pop the earliest live timer due at or before `until`, moving `now` to its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        loop {
            let &Reverse((due, id)) = self.queue.peek()?;
            if due > until {
                return None;
            }
            self.queue.pop();
            if let Some(event) = self.pending.remove(&id) {
                self.now = self.now.max(due);
                return Some((TimerId(id), event));
            }
        }
    }

    /// Move `now` forward to `t`. Never moves backwards.
    pub fn advance_to(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }
}
