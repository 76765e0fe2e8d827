use std::time::Duration;

/// Opaque handle for a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Schedules delayed callbacks on behalf of a session
///
/// Implementations deliver a fired handle back to the owning session through
/// `SwipeSession::on_timer`. A cancelled handle must never be delivered, or
/// must be tolerated as stale by the receiver.
pub trait Scheduler {
    fn schedule(&mut self, after: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Lets a session borrow a scheduler that outlives it
impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, after: Duration) -> TimerHandle {
        (**self).schedule(after)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

/// What a pending timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Clear the fling animation, then show a match or advance the queue
    Settle,
    /// Show the next card after the entrance pulse
    Reveal,
}

/// Timers currently owned by a session
#[derive(Debug, Clone, Default)]
pub struct PendingTimers {
    entries: Vec<(TimerHandle, TimerKind)>,
}

impl PendingTimers {
    pub fn insert(&mut self, handle: TimerHandle, kind: TimerKind) {
        self.entries.push((handle, kind));
    }

    /// Remove a timer by handle, returning its kind if it was pending
    pub fn take(&mut self, handle: TimerHandle) -> Option<TimerKind> {
        let position = self.entries.iter().position(|(h, _)| *h == handle)?;
        Some(self.entries.remove(position).1)
    }

    pub fn take_kind(&mut self, kind: TimerKind) -> Option<TimerHandle> {
        let position = self.entries.iter().position(|(_, k)| *k == kind)?;
        Some(self.entries.remove(position).0)
    }

    pub fn drain(&mut self) -> Vec<TimerHandle> {
        self.entries.drain(..).map(|(h, _)| h).collect()
    }

    pub fn contains(&self, kind: TimerKind) -> bool {
        self.entries.iter().any(|(_, k)| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
