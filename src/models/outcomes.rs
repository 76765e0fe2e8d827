use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::{CandidateId, Decision, Destination, MatchRecord, SessionStats, Transform};

/// State change applied by a session in response to an input or timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Input had no effect in the current phase
    Ignored,
    DragStarted { origin_x: f64 },
    Dragged { transform: Transform },
    /// Release within the threshold; card snaps back
    Reset,
    Decided { decision: Decision },
    Matched { candidate_id: CandidateId },
    Advanced { cursor: usize, wrapped: bool },
    Revealed,
    Navigated { destination: Destination },
    TornDown,
}

/// End-of-session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    pub cursor: usize,
    pub stats: SessionStats,
    pub matches: Vec<MatchRecord>,
}
