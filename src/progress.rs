//! Progress tracking business logic layer.

use tracing::{debug, info, instrument};

use crate::store::{
    GameRecord, KvStore, PlayerProfile, ProgressRepository, SessionStats, StoreError,
};

/// Service layer over [`ProgressRepository`].
///
/// The single place where a finished game touches stored state: the
/// history append and the stats/profile updates happen together, at
/// game end, and nowhere else.
#[derive(Debug, Clone)]
pub struct ProgressService<S> {
    repository: ProgressRepository<S>,
}

impl<S: KvStore> ProgressService<S> {
    /// Creates a new progress service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: ProgressRepository<S>) -> Self {
        info!("Creating ProgressService");
        Self { repository }
    }

    /// Creates a service directly over a store.
    pub fn from_store(store: S) -> Self {
        Self::new(ProgressRepository::new(store))
    }

    /// Aggregate stats, zeroed if nothing is stored yet.
    #[instrument(skip(self))]
    pub fn stats(&self) -> SessionStats {
        self.repository.load_stats()
    }

    /// The player profile, defaulted if nothing is stored yet.
    #[instrument(skip(self))]
    pub fn profile(&self) -> PlayerProfile {
        self.repository.load_profile()
    }

    /// All recorded games, oldest first.
    #[instrument(skip(self))]
    pub fn history(&self) -> Vec<GameRecord> {
        self.repository.load_history()
    }

    /// Records a finished game: appends it to the history and folds
    /// the result into the stats and profile counters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if any of the writes fail.
    #[instrument(skip(self, record), fields(result = record.result().label()))]
    pub fn record_game(&mut self, record: GameRecord) -> Result<SessionStats, StoreError> {
        debug!("Recording finished game");

        let mut stats = self.repository.load_stats();
        stats.record(*record.result(), *record.played_at());

        let mut profile = self.repository.load_profile();
        profile.record(*record.result());

        self.repository.append_record(record)?;
        self.repository.save_stats(&stats)?;
        self.repository.save_profile(&profile)?;

        info!(total_games = *stats.total_games(), "Game recorded");
        Ok(stats)
    }

    /// Returns the stored profile, renaming it first if the identity
    /// differs. Win/loss counters are kept either way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the profile write fails.
    #[instrument(skip(self))]
    pub fn ensure_profile(&mut self, name: &str, avatar: &str) -> Result<PlayerProfile, StoreError> {
        let stored = self.repository.load_profile();
        if stored.name() == name && stored.avatar() == avatar {
            return Ok(stored);
        }

        debug!(name, "Updating profile identity");
        let profile = PlayerProfile::new(
            name.to_string(),
            avatar.to_string(),
            *stored.wins(),
            *stored.losses(),
        );
        self.repository.save_profile(&profile)?;
        Ok(profile)
    }
}
