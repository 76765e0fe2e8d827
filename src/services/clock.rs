use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use crate::core::{Navigator, Scheduler, SwipeSession, TimerHandle};
use crate::models::Transition;

/// Deterministic virtual-time scheduler
///
/// Timers fire in deadline order; timers sharing a deadline fire in the
/// order they were scheduled. Time only moves when the owner advances it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    queue: BTreeSet<(Duration, u64)>,
    deadlines: HashMap<u64, Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.first().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving time to its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let &(deadline, id) = self.queue.first()?;
        if deadline > until {
            return None;
        }

        self.queue.remove(&(deadline, id));
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some(TimerHandle::from_raw(id))
    }

    /// Move time forward without firing anything; never moves backwards
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualClock {
    fn schedule(&mut self, after: Duration) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;

        let deadline = self.now + after;
        self.queue.insert((deadline, id));
        self.deadlines.insert(id, deadline);
        TimerHandle::from_raw(id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(deadline) = self.deadlines.remove(&handle.raw()) {
            self.queue.remove(&(deadline, handle.raw()));
        }
    }
}

impl<N: Navigator> SwipeSession<ManualClock, N> {
    /// Advance virtual time, firing every timer that comes due
    ///
    /// Timers scheduled by a fired timer also fire if they land inside the window.
    pub fn advance(&mut self, by: Duration) -> Vec<Transition> {
        let target = self.scheduler().now() + by;
        let mut fired = Vec::new();

        while let Some(handle) = self.scheduler_mut().pop_due(target) {
            fired.push(self.on_timer(handle));
        }
        self.scheduler_mut().set_now(target);

        fired
    }

    pub fn advance_ms(&mut self, ms: u64) -> Vec<Transition> {
        self.advance(Duration::from_millis(ms))
    }
}
