//! Progress persistence: models, key-value backends, repository.

mod error;
mod kv;
mod models;
mod repository;

pub use error::StoreError;
pub use kv::{JsonFileStore, KvStore, MemoryStore};
pub use models::{GameRecord, GameResult, PlayerProfile, SessionStats};
pub use repository::{HISTORY_KEY, PROFILE_KEY, ProgressRepository, STATS_KEY};
