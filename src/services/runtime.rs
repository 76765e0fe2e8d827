use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::core::{Navigator, Scheduler, SwipeSession, TimerHandle};
use crate::models::{Deck, SessionInput, SwipeConfig};

/// Scheduler backed by Tokio timers
///
/// Each timer is a spawned sleep that posts its handle on a channel when it
/// elapses. Cancelling aborts the task; dropping the scheduler aborts all of them.
/// `schedule` must be called from within a Tokio runtime.
///
/// Delivered handles should be passed to `forget`. Finished tasks that were
/// never forgotten are pruned on the next `schedule`.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<TimerHandle>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its fired timers arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            fired,
        };
        (scheduler, receiver)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Drop bookkeeping for a timer whose handle has been delivered
    pub fn forget(&mut self, handle: TimerHandle) {
        self.tasks.remove(&handle);
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, after: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        let handle = TimerHandle::from_raw(self.next_id);
        self.next_id += 1;

        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // Receiver gone means the driver already stopped
            let _ = fired.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            trace!(timer = handle.raw(), "timer aborted");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Drives a session from an input channel and its own timers
///
/// Everything runs on the task calling `run`, so inputs and timer callbacks
/// never interleave within a single transition.
pub struct SessionDriver<N: Navigator> {
    session: SwipeSession<TokioScheduler, N>,
    fired: mpsc::UnboundedReceiver<TimerHandle>,
}

impl<N: Navigator> SessionDriver<N> {
    pub fn new(deck: Deck, config: SwipeConfig, navigator: N) -> Self {
        let (scheduler, fired) = TokioScheduler::new();
        Self {
            session: SwipeSession::new(deck, config, scheduler, navigator),
            fired,
        }
    }

    pub fn session(&self) -> &SwipeSession<TokioScheduler, N> {
        &self.session
    }

    /// Process inputs and timers until the session is torn down, or the
    /// input channel closes and no timers remain
    pub async fn run(
        mut self,
        mut inputs: mpsc::Receiver<SessionInput>,
    ) -> SwipeSession<TokioScheduler, N> {
        let mut inputs_open = true;

        loop {
            if self.session.is_torn_down() {
                break;
            }
            if !inputs_open && self.session.pending_timers() == 0 {
                break;
            }

            tokio::select! {
                input = inputs.recv(), if inputs_open => match input {
                    Some(input) => {
                        let transition = self.session.apply(input);
                        debug!(?transition, "input applied");
                    }
                    None => {
                        debug!("input channel closed, draining timers");
                        inputs_open = false;
                    }
                },
                Some(handle) = self.fired.recv() => {
                    self.session.scheduler_mut().forget(handle);
                    let transition = self.session.on_timer(handle);
                    debug!(?transition, "timer fired");
                }
                else => break,
            }
        }

        self.session
    }
}

impl<N: Navigator> std::fmt::Debug for SessionDriver<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDriver")
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_delivers_after_delay() {
        let (mut scheduler, mut fired) = TokioScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(375));
        assert_eq!(scheduler.pending(), 1);

        let delivered = fired.recv().await.unwrap();
        assert_eq!(delivered, handle);
        scheduler.forget(delivered);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_delivers() {
        let (mut scheduler, mut fired) = TokioScheduler::new();
        let cancelled = scheduler.schedule(Duration::from_millis(100));
        let kept = scheduler.schedule(Duration::from_millis(200));
        scheduler.cancel(cancelled);

        assert_eq!(fired.recv().await, Some(kept));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_prunes_finished_tasks() {
        let (mut scheduler, mut fired) = TokioScheduler::new();
        let first = scheduler.schedule(Duration::from_millis(10));
        assert_eq!(fired.recv().await, Some(first));
        tokio::task::yield_now().await;

        // `first` was never forgotten
        scheduler.schedule(Duration::from_millis(10));
        assert_eq!(scheduler.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_session_aborts_its_timers() {
        let (scheduler, mut fired) = TokioScheduler::new();
        let mut session = SwipeSession::new(
            Deck::mock(),
            SwipeConfig::default(),
            scheduler,
            |_: crate::models::Destination| {},
        );
        session.on_action_button(crate::models::Decision::Like);
        assert_eq!(session.pending_timers(), 1);
        drop(session);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(fired.try_recv().is_err());
    }
}
