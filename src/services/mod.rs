// Service exports
pub mod clock;
pub mod deck;
pub mod navigator;
pub mod runtime;
pub mod script;

pub use clock::ManualClock;
pub use deck::{load_deck, parse_json_deck, parse_toml_deck, validate_deck, DeckError};
pub use navigator::RecordingNavigator;
pub use runtime::{SessionDriver, TokioScheduler};
pub use script::{feed, parse_script, read_script, ScriptError, ScriptStep};
