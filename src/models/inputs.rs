use serde::{Deserialize, Serialize};
use crate::models::domain::{Decision, Destination};

/// A single input delivered to a swipe session
///
/// Touch and mouse sources are unified into the pointer variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionInput {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    /// Pointer left the tracking area mid-drag
    PointerLeave,
    Like,
    Reject,
    StartConversation,
    ContinueBrowsing,
    Leave { destination: Destination },
    Teardown,
}

impl From<Decision> for SessionInput {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Like => SessionInput::Like,
            Decision::Reject => SessionInput::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_tags() {
        let down: SessionInput = serde_json::from_str(r#"{"type":"pointer_down","x":12.5}"#).unwrap();
        assert_eq!(down, SessionInput::PointerDown { x: 12.5 });

        let leave: SessionInput =
            serde_json::from_str(r#"{"type":"leave","destination":{"screen":"gyms"}}"#).unwrap();
        assert_eq!(
            leave,
            SessionInput::Leave {
                destination: Destination::Gyms
            }
        );
    }
}
