// Model exports
pub mod domain;
pub mod inputs;
pub mod outcomes;

pub use domain::{
    Candidate, CandidateId, Deck, Decision, DecisionAnimation, Destination, GestureState,
    MatchRecord, SessionStats, SwipeConfig, Transform,
};
pub use inputs::SessionInput;
pub use outcomes::{SessionSummary, Transition};
