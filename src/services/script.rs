use serde::{Deserialize, Serialize};
use std::io::Read;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::models::SessionInput;

/// Errors that can occur while reading a replay script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid step on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Step on line {line} at {at_ms}ms comes before the previous step at {previous_ms}ms")]
    OutOfOrder {
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },
}

/// One timed input of a replay script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Offset from the start of the replay
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: SessionInput,
}

/// Parse a script from JSON lines or a single JSON array
///
/// Blank lines and lines starting with `#` are skipped in JSON lines mode.
/// For arrays, `line` in errors refers to the step's position in the array.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let trimmed = text.trim_start();

    let numbered: Vec<(usize, ScriptStep)> = if trimmed.starts_with('[') {
        let steps: Vec<ScriptStep> = serde_json::from_str(trimmed).map_err(|source| {
            ScriptError::Parse {
                line: source.line(),
                source,
            }
        })?;
        steps.into_iter().enumerate().map(|(i, s)| (i + 1, s)).collect()
    } else {
        let mut steps = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let step = serde_json::from_str(line)
                .map_err(|source| ScriptError::Parse { line: i + 1, source })?;
            steps.push((i + 1, step));
        }
        steps
    };

    let mut previous_ms = 0;
    for (line, step) in &numbered {
        if step.at_ms < previous_ms {
            return Err(ScriptError::OutOfOrder {
                line: *line,
                at_ms: step.at_ms,
                previous_ms,
            });
        }
        previous_ms = step.at_ms;
    }

    Ok(numbered.into_iter().map(|(_, step)| step).collect())
}

pub fn read_script<R: Read>(mut reader: R) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_script(&text)
}

/// Send each step's input at its offset from now
///
/// Stops early if the receiving session has gone away.
pub async fn feed(steps: Vec<ScriptStep>, inputs: mpsc::Sender<SessionInput>) {
    let start = Instant::now();

    for step in steps {
        sleep_until(start + Duration::from_millis(step.at_ms)).await;
        if inputs.send(step.input).await.is_err() {
            tracing::debug!("Session closed, {}ms step dropped", step.at_ms);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Destination;

    #[test]
    fn test_parse_json_lines() {
        let script = r#"
# drag right past the threshold
{"at_ms": 0, "type": "pointer_down", "x": 10}
{"at_ms": 40, "type": "pointer_move", "x": 160}
{"at_ms": 80, "type": "pointer_up"}

{"at_ms": 2000, "type": "leave", "destination": {"screen": "gyms"}}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].input, SessionInput::PointerDown { x: 10.0 });
        assert_eq!(steps[2].input, SessionInput::PointerUp);
        assert_eq!(
            steps[3].input,
            SessionInput::Leave {
                destination: Destination::Gyms
            }
        );
    }

    #[test]
    fn test_parse_array() {
        let script = r#"[{"at_ms": 0, "type": "like"}, {"at_ms": 1500, "type": "continue_browsing"}]"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(steps[1].at_ms, 1500);
        assert_eq!(steps[1].input, SessionInput::ContinueBrowsing);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let script = "{\"at_ms\": 0, \"type\": \"like\"}\n{\"at_ms\": 5, \"type\": \"wave\"}";
        match parse_script(script) {
            Err(ScriptError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_order_rejected() {
        let script = "{\"at_ms\": 100, \"type\": \"like\"}\n{\"at_ms\": 50, \"type\": \"reject\"}";
        assert!(matches!(
            parse_script(script),
            Err(ScriptError::OutOfOrder { line: 2, at_ms: 50, previous_ms: 100 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_respects_offsets() {
        let (tx, mut rx) = mpsc::channel(8);
        let steps = parse_script(
            "{\"at_ms\": 0, \"type\": \"like\"}\n{\"at_ms\": 500, \"type\": \"reject\"}",
        )
        .unwrap();

        let start = Instant::now();
        tokio::spawn(feed(steps, tx));

        assert_eq!(rx.recv().await, Some(SessionInput::Like));
        assert_eq!(rx.recv().await, Some(SessionInput::Reject));
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(rx.recv().await, None);
    }
}
