//! Typed progress storage over a key-value store.

use super::error::StoreError;
use super::kv::KvStore;
use super::models::{GameRecord, PlayerProfile, SessionStats};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Storage key for aggregate stats.
pub const STATS_KEY: &str = "tictactoe_stats";
/// Storage key for the game history.
pub const HISTORY_KEY: &str = "tictactoe_history";
/// Storage key for the player profile.
pub const PROFILE_KEY: &str = "tictactoe_profile";

/// Typed reads and writes over a [`KvStore`].
///
/// Reads always succeed: a missing, unreadable, or corrupt value falls
/// back to the type's default, so a damaged store can never keep the
/// game from starting.
#[derive(Debug, Clone)]
pub struct ProgressRepository<S> {
    store: S,
}

impl<S: KvStore> ProgressRepository<S> {
    /// Creates a repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consumes the repository, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "Stored value is corrupt, using defaults");
                    T::default()
                }
            },
            Ok(None) => {
                debug!(key, "No stored value");
                T::default()
            }
            Err(e) => {
                warn!(key, error = %e, "Store read failed, using defaults");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Loads the aggregate stats, or zeroed counters.
    #[instrument(skip(self))]
    pub fn load_stats(&self) -> SessionStats {
        self.load_or_default(STATS_KEY)
    }

    /// Persists the aggregate stats.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store write fails.
    #[instrument(skip(self, stats))]
    pub fn save_stats(&mut self, stats: &SessionStats) -> Result<(), StoreError> {
        self.save(STATS_KEY, stats)
    }

    /// Loads the full game history, oldest first, or an empty list.
    #[instrument(skip(self))]
    pub fn load_history(&self) -> Vec<GameRecord> {
        self.load_or_default(HISTORY_KEY)
    }

    /// Appends one finished game to the history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store write fails.
    #[instrument(skip(self, record), fields(result = record.result().label()))]
    pub fn append_record(&mut self, record: GameRecord) -> Result<(), StoreError> {
        let mut history = self.load_history();
        history.push(record);
        info!(games = history.len(), "Appending game record");
        self.save(HISTORY_KEY, &history)
    }

    /// Loads the player profile, or the default profile.
    #[instrument(skip(self))]
    pub fn load_profile(&self) -> PlayerProfile {
        self.load_or_default(PROFILE_KEY)
    }

    /// Persists the player profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store write fails.
    #[instrument(skip(self, profile))]
    pub fn save_profile(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        self.save(PROFILE_KEY, profile)
    }
}
