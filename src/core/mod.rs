// Core swipe engine exports
pub mod evaluator;
pub mod gesture;
pub mod queue;
pub mod session;
pub mod timers;

pub use evaluator::{evaluate, MatchLedger, MatchOutcome};
pub use gesture::{classify, drag_transform, SwipeInterpreter};
pub use queue::{next_index, QueueCursor, Step};
pub use session::{Navigator, Phase, SwipeSession};
pub use timers::{PendingTimers, Scheduler, TimerHandle, TimerKind};
