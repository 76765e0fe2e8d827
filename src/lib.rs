//! FitPair - swipe-to-match engine for the FitPair training-partner app
//!
//! This library provides the swipe screen's state machine: a gesture
//! interpreter, the mutual-match evaluator and a circular candidate queue,
//! paced by cancellable timers owned by the session.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Navigator, Phase, Scheduler, SwipeSession, TimerHandle};
pub use crate::models::{Candidate, Deck, Decision, Destination, MatchRecord, SessionInput, SwipeConfig, Transition};
pub use crate::services::{ManualClock, RecordingNavigator, SessionDriver, TokioScheduler};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let session = SwipeSession::new(
            Deck::mock(),
            SwipeConfig::default(),
            ManualClock::new(),
            RecordingNavigator::new(),
        );
        assert_eq!(session.current().map(|c| c.id), Some(1));
    }
}
