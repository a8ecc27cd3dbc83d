//! Application configuration.

use crate::game::Difficulty;
use crate::tournament::DEFAULT_ROUNDS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Application configuration, loadable from a TOML file.
///
/// Every field has a default, so a missing file or a partial one is
/// fine.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default opponent difficulty for new sessions.
    #[serde(default)]
    difficulty: Difficulty,

    /// Opponent thinking pause, in milliseconds.
    #[serde(default = "default_move_delay_ms")]
    move_delay_ms: u64,

    /// Pause between tournament rounds, in milliseconds.
    #[serde(default = "default_round_delay_ms")]
    round_delay_ms: u64,

    /// Pause before announcing the final tournament result, in
    /// milliseconds.
    #[serde(default = "default_result_delay_ms")]
    result_delay_ms: u64,

    /// Rounds per tournament.
    #[serde(default = "default_rounds")]
    tournament_rounds: u32,

    /// Path of the progress store file.
    #[serde(default = "default_data_path")]
    data_path: String,

    /// Player display name.
    #[serde(default = "default_profile_name")]
    profile_name: String,

    /// Player avatar glyph.
    #[serde(default = "default_profile_avatar")]
    profile_avatar: String,
}

fn default_move_delay_ms() -> u64 {
    500
}

fn default_round_delay_ms() -> u64 {
    1500
}

fn default_result_delay_ms() -> u64 {
    1000
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

fn default_data_path() -> String {
    "tictac_arena.json".to_string()
}

fn default_profile_name() -> String {
    "Player".to_string()
}

fn default_profile_avatar() -> String {
    "\u{1F464}".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            move_delay_ms: default_move_delay_ms(),
            round_delay_ms: default_round_delay_ms(),
            result_delay_ms: default_result_delay_ms(),
            tournament_rounds: default_rounds(),
            data_path: default_data_path(),
            profile_name: default_profile_name(),
            profile_avatar: default_profile_avatar(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file. A missing file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read
    /// or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(difficulty = %config.difficulty, "Config loaded");
        Ok(config)
    }

    /// Opponent thinking pause.
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Pause between tournament rounds.
    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    /// Pause before the final tournament result.
    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
