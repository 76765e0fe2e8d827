use std::time::Duration;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::core::{
    evaluator::{evaluate, MatchLedger},
    gesture::SwipeInterpreter,
    queue::QueueCursor,
    timers::{PendingTimers, Scheduler, TimerHandle, TimerKind},
};
use crate::models::{
    Candidate, Deck, Decision, DecisionAnimation, Destination, MatchRecord, SessionInput,
    SessionStats, SessionSummary, SwipeConfig, Transform, Transition,
};

/// Receives navigation requests leaving the swipe screen
pub trait Navigator {
    fn navigate(&mut self, destination: Destination);
}

impl<F> Navigator for F
where
    F: FnMut(Destination),
{
    fn navigate(&mut self, destination: Destination) {
        self(destination)
    }
}

/// Where a session is within one swipe cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    /// Fling animation playing, settle timer pending
    Deciding(Decision),
    /// Mutual match shown; swipes blocked until resolved
    MatchNotification,
}

/// Swipe-to-match session over a circular candidate deck
///
/// Owns every piece of per-screen state: the gesture, the fling animation,
/// the queue cursor, the match ledger and the timers it has scheduled.
/// Timers are cancelled on `teardown`, which also runs on drop.
///
/// # Cycle
/// 1. Pointer down starts a drag, pointer up resolves it against the threshold
/// 2. A decision starts the fling and schedules a settle timer
/// 3. Settling either shows a match notification or advances the queue
/// 4. Advancing hides the card and schedules a reveal timer
pub struct SwipeSession<S: Scheduler, N: Navigator> {
    id: Uuid,
    deck: Deck,
    config: SwipeConfig,
    cursor: QueueCursor,
    interpreter: SwipeInterpreter,
    animation: DecisionAnimation,
    phase: Phase,
    visible: bool,
    ledger: MatchLedger,
    timers: PendingTimers,
    stats: SessionStats,
    scheduler: S,
    navigator: N,
    torn_down: bool,
}

impl<S: Scheduler, N: Navigator> SwipeSession<S, N> {
    pub fn new(deck: Deck, config: SwipeConfig, scheduler: S, navigator: N) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, candidates = deck.len(), "swipe session created");

        Self {
            id,
            cursor: QueueCursor::new(deck.len()),
            interpreter: SwipeInterpreter::from_config(&config),
            deck,
            config,
            animation: DecisionAnimation::None,
            phase: Phase::Idle,
            visible: true,
            ledger: MatchLedger::new(),
            timers: PendingTimers::default(),
            stats: SessionStats::default(),
            scheduler,
            navigator,
            torn_down: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Candidate on the card, `None` for an empty deck
    pub fn current(&self) -> Option<&Candidate> {
        self.deck.get(self.cursor.index())
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn animation(&self) -> DecisionAnimation {
        self.animation
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn matches(&self) -> &[MatchRecord] {
        self.ledger.records()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Candidate behind the match notification, if one is showing
    pub fn notification(&self) -> Option<&Candidate> {
        match self.phase {
            Phase::MatchNotification => self.current(),
            _ => None,
        }
    }

    /// Card transform: the fixed fling while animating, else the live drag
    pub fn transform(&self) -> Transform {
        self.animation
            .fling(self.config.fling_offset, self.config.fling_rotation_deg)
            .unwrap_or_else(|| self.interpreter.transform())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            cursor: self.cursor.index(),
            stats: self.stats,
            matches: self.ledger.records().to_vec(),
        }
    }

    fn accepts_input(&self) -> bool {
        !self.torn_down && !self.deck.is_empty()
    }

    pub fn on_pointer_down(&mut self, x: f64) -> Transition {
        if !self.accepts_input() {
            return Transition::Ignored;
        }

        match self.phase {
            Phase::Idle => {
                self.interpreter.begin(x);
                self.phase = Phase::Dragging;
                trace!(session_id = %self.id, origin_x = x, "drag started");
                Transition::DragStarted { origin_x: x }
            }
            // A second press while dragging ends the first gesture where it was
            Phase::Dragging => {
                debug!(session_id = %self.id, "pointer down while dragging, resolving gesture");
                self.on_pointer_up()
            }
            _ => Transition::Ignored,
        }
    }

    pub fn on_pointer_move(&mut self, x: f64) -> Transition {
        if !self.accepts_input() || self.phase != Phase::Dragging {
            return Transition::Ignored;
        }

        match self.interpreter.track(x) {
            Some(transform) => Transition::Dragged { transform },
            None => Transition::Ignored,
        }
    }

    pub fn on_pointer_up(&mut self) -> Transition {
        if !self.accepts_input() || self.phase != Phase::Dragging {
            return Transition::Ignored;
        }

        match self.interpreter.release() {
            Some(decision) => self.decide(decision),
            None => {
                trace!(
                    session_id = %self.id,
                    delta_x = self.interpreter.state().delta_x,
                    "release within threshold"
                );
                self.interpreter.reset();
                self.phase = Phase::Idle;
                self.stats.insufficient += 1;
                Transition::Reset
            }
        }
    }

    /// Pointer left the tracking area; resolves like a release
    pub fn on_pointer_leave(&mut self) -> Transition {
        self.on_pointer_up()
    }

    /// Accept or reject control; intent is explicit so no threshold applies
    pub fn on_action_button(&mut self, decision: Decision) -> Transition {
        if !self.accepts_input() {
            return Transition::Ignored;
        }

        match self.phase {
            Phase::Idle => self.decide(decision),
            Phase::Dragging => {
                self.interpreter.reset();
                self.decide(decision)
            }
            _ => Transition::Ignored,
        }
    }

    /// Resolve the match notification by opening a chat with the match
    ///
    /// Opening the chat leaves the screen, so the session is torn down after
    /// navigating, like `leave`.
    pub fn start_conversation(&mut self) -> Transition {
        if self.torn_down || self.phase != Phase::MatchNotification {
            return Transition::Ignored;
        }
        let Some(candidate_id) = self.current().map(|c| c.id) else {
            return Transition::Ignored;
        };

        self.phase = Phase::Idle;
        self.advance_queue();

        let destination = Destination::Chat { candidate_id };
        info!(session_id = %self.id, %destination, "starting conversation");
        self.navigator.navigate(destination.clone());
        self.teardown();
        Transition::Navigated { destination }
    }

    /// Dismiss the match notification and move to the next candidate
    pub fn continue_browsing(&mut self) -> Transition {
        if self.torn_down || self.phase != Phase::MatchNotification {
            return Transition::Ignored;
        }

        debug!(session_id = %self.id, "match notification dismissed");
        self.phase = Phase::Idle;
        self.advance_queue()
    }

    /// Leave the screen through any other control
    pub fn leave(&mut self, destination: Destination) -> Transition {
        if self.torn_down {
            return Transition::Ignored;
        }

        info!(session_id = %self.id, %destination, "leaving swipe screen");
        self.navigator.navigate(destination.clone());
        self.teardown();
        Transition::Navigated { destination }
    }

    /// Cancel every pending timer; the session ignores all input afterwards
    pub fn teardown(&mut self) -> Transition {
        if self.torn_down {
            return Transition::Ignored;
        }

        let handles = self.timers.drain();
        debug!(session_id = %self.id, cancelled = handles.len(), "tearing down swipe session");
        for handle in handles {
            self.scheduler.cancel(handle);
        }

        self.interpreter.reset();
        self.animation = DecisionAnimation::None;
        self.phase = Phase::Idle;
        self.torn_down = true;
        Transition::TornDown
    }

    /// Deliver a fired timer; unknown or cancelled handles are ignored
    pub fn on_timer(&mut self, handle: TimerHandle) -> Transition {
        if self.torn_down {
            return Transition::Ignored;
        }

        match self.timers.take(handle) {
            Some(TimerKind::Settle) => self.settle(),
            Some(TimerKind::Reveal) => {
                self.visible = true;
                trace!(session_id = %self.id, cursor = self.cursor.index(), "card revealed");
                Transition::Revealed
            }
            None => {
                trace!(session_id = %self.id, timer = handle.raw(), "stale timer ignored");
                Transition::Ignored
            }
        }
    }

    pub fn apply(&mut self, input: SessionInput) -> Transition {
        match input {
            SessionInput::PointerDown { x } => self.on_pointer_down(x),
            SessionInput::PointerMove { x } => self.on_pointer_move(x),
            SessionInput::PointerUp => self.on_pointer_up(),
            SessionInput::PointerLeave => self.on_pointer_leave(),
            SessionInput::Like => self.on_action_button(Decision::Like),
            SessionInput::Reject => self.on_action_button(Decision::Reject),
            SessionInput::StartConversation => self.start_conversation(),
            SessionInput::ContinueBrowsing => self.continue_browsing(),
            SessionInput::Leave { destination } => self.leave(destination),
            SessionInput::Teardown => self.teardown(),
        }
    }

    fn decide(&mut self, decision: Decision) -> Transition {
        let Some(candidate) = self.current() else {
            return Transition::Ignored;
        };

        let delay = if evaluate(candidate, decision).is_mutual() {
            self.config.match_delay
        } else {
            self.config.standard_delay
        };
        info!(
            session_id = %self.id,
            candidate_id = candidate.id,
            %decision,
            delay_ms = delay.as_millis() as u64,
            "swipe decided"
        );

        match decision {
            Decision::Like => self.stats.likes += 1,
            Decision::Reject => self.stats.rejects += 1,
        }
        self.animation = DecisionAnimation::from(decision);
        self.phase = Phase::Deciding(decision);
        self.schedule(TimerKind::Settle, delay);

        Transition::Decided { decision }
    }

    /// Fling finished: clear the animation, then match or advance
    fn settle(&mut self) -> Transition {
        let Phase::Deciding(decision) = self.phase else {
            return Transition::Ignored;
        };

        self.animation = DecisionAnimation::None;
        self.interpreter.reset();

        let Some(candidate) = self.deck.get(self.cursor.index()) else {
            self.phase = Phase::Idle;
            return Transition::Ignored;
        };

        if evaluate(candidate, decision).is_mutual() {
            let candidate_id = candidate.id;
            let record_id = self.ledger.record(candidate).id;
            self.stats.matches += 1;
            self.phase = Phase::MatchNotification;
            info!(session_id = %self.id, candidate_id, match_id = %record_id, "mutual match");
            Transition::Matched { candidate_id }
        } else {
            self.phase = Phase::Idle;
            self.advance_queue()
        }
    }

    fn advance_queue(&mut self) -> Transition {
        let step = self.cursor.advance();
        self.stats.advances += 1;
        if step.wrapped {
            self.stats.wraps += 1;
        }

        self.visible = false;
        if let Some(previous) = self.timers.take_kind(TimerKind::Reveal) {
            self.scheduler.cancel(previous);
        }
        self.schedule(TimerKind::Reveal, self.config.reveal_delay);

        debug!(session_id = %self.id, cursor = step.index, wrapped = step.wrapped, "queue advanced");
        Transition::Advanced {
            cursor: step.index,
            wrapped: step.wrapped,
        }
    }

    fn schedule(&mut self, kind: TimerKind, after: Duration) {
        let handle = self.scheduler.schedule(after);
        trace!(
            session_id = %self.id,
            timer = handle.raw(),
            ?kind,
            after_ms = after.as_millis() as u64,
            "timer scheduled"
        );
        self.timers.insert(handle, kind);
    }
}

impl<S: Scheduler, N: Navigator> Drop for SwipeSession<S, N> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: Scheduler, N: Navigator> std::fmt::Debug for SwipeSession<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeSession")
            .field("id", &self.id)
            .field("cursor", &self.cursor.index())
            .field("phase", &self.phase)
            .field("animation", &self.animation)
            .field("visible", &self.visible)
            .field("matches", &self.ledger.len())
            .field("pending_timers", &self.timers.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
