use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::domain::{
    SwipeConfig, DEFAULT_FLING_OFFSET, DEFAULT_FLING_ROTATION_DEG, DEFAULT_MATCH_DELAY_MS,
    DEFAULT_REVEAL_DELAY_MS, DEFAULT_ROTATION_DIVISOR, DEFAULT_STANDARD_DELAY_MS,
    DEFAULT_SWIPE_THRESHOLD,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub swipe: SwipeSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_rotation_divisor")]
    pub rotation_divisor: f64,
    #[serde(default = "default_fling_offset")]
    pub fling_offset: f64,
    #[serde(default = "default_fling_rotation_deg")]
    pub fling_rotation_deg: f64,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            rotation_divisor: default_rotation_divisor(),
            fling_offset: default_fling_offset(),
            fling_rotation_deg: default_fling_rotation_deg(),
        }
    }
}

fn default_threshold() -> f64 { DEFAULT_SWIPE_THRESHOLD }
fn default_rotation_divisor() -> f64 { DEFAULT_ROTATION_DIVISOR }
fn default_fling_offset() -> f64 { DEFAULT_FLING_OFFSET }
fn default_fling_rotation_deg() -> f64 { DEFAULT_FLING_ROTATION_DEG }

#[derive(Debug, Clone, Deserialize)]
pub struct TimingSettings {
    #[serde(default = "default_standard_delay_ms")]
    pub standard_delay_ms: u64,
    #[serde(default = "default_match_delay_ms")]
    pub match_delay_ms: u64,
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            standard_delay_ms: default_standard_delay_ms(),
            match_delay_ms: default_match_delay_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

fn default_standard_delay_ms() -> u64 { DEFAULT_STANDARD_DELAY_MS }
fn default_match_delay_ms() -> u64 { DEFAULT_MATCH_DELAY_MS }
fn default_reveal_delay_ms() -> u64 { DEFAULT_REVEAL_DELAY_MS }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckSettings {
    /// JSON or TOML deck file; the built-in mock deck is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FITPAIR)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FITPAIR__TIMING__MATCH_DELAY_MS -> timing.match_delay_ms
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Validate the swipe and timing sections and convert them for the engine
    pub fn swipe_config(&self) -> Result<SwipeConfig, ConfigError> {
        if !(self.swipe.threshold > 0.0) {
            return Err(ConfigError::Message(format!(
                "swipe.threshold must be positive, got {}",
                self.swipe.threshold
            )));
        }
        if !(self.swipe.rotation_divisor.is_finite() && self.swipe.rotation_divisor != 0.0) {
            return Err(ConfigError::Message(format!(
                "swipe.rotation_divisor must be finite and non-zero, got {}",
                self.swipe.rotation_divisor
            )));
        }
        if self.timing.match_delay_ms < self.timing.standard_delay_ms {
            return Err(ConfigError::Message(format!(
                "timing.match_delay_ms ({}) must not be shorter than timing.standard_delay_ms ({})",
                self.timing.match_delay_ms, self.timing.standard_delay_ms
            )));
        }

        Ok(SwipeConfig {
            threshold: self.swipe.threshold,
            rotation_divisor: self.swipe.rotation_divisor,
            fling_offset: self.swipe.fling_offset,
            fling_rotation_deg: self.swipe.fling_rotation_deg,
            standard_delay: Duration::from_millis(self.timing.standard_delay_ms),
            match_delay: Duration::from_millis(self.timing.match_delay_ms),
            reveal_delay: Duration::from_millis(self.timing.reveal_delay_ms),
        })
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FITPAIR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
