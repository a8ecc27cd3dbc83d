//! Tic-tac-toe arcade engine.
//!
//! One game at a time against a difficulty-tiered computer opponent,
//! with persistent progress tracking and a best-of-N tournament mode.
//!
//! # Architecture
//!
//! - **Game**: board model, exhaustive minimax search, opponent policy
//! - **Session**: one game driven move by move through a phase machine
//! - **Tournament**: fixed-length series of independent games
//! - **Store**: progress persistence behind a swappable key-value store
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tictac_arena::{Difficulty, GameSession, Phase};
//!
//! # async fn example() -> Result<(), tictac_arena::SessionError> {
//! let mut session =
//!     GameSession::new(Difficulty::Hard).with_thinking_delay(Duration::ZERO);
//!
//! let report = session.submit_move(4)?;
//! assert_eq!(report.phase, Phase::AwaitingOpponentMove);
//!
//! // Rejected while the opponent is thinking.
//! assert!(session.submit_move(0).is_err());
//!
//! session.opponent_turn().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod game;
mod progress;
mod session;
mod store;
mod tournament;

pub mod replay;

// Crate-level exports - CLI surface
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Game logic
pub use game::{Board, CELLS, Difficulty, Mark, MoveError, Outcome, Square, best_move, choose_move};

// Crate-level exports - Progress service
pub use progress::ProgressService;

// Crate-level exports - Session controller
pub use session::{DEFAULT_THINKING_DELAY, GameSession, MoveReport, Phase, SessionError};

// Crate-level exports - Persistence
pub use store::{
    GameRecord, GameResult, HISTORY_KEY, JsonFileStore, KvStore, MemoryStore, PROFILE_KEY,
    PlayerProfile, ProgressRepository, STATS_KEY, SessionStats, StoreError,
};

// Crate-level exports - Tournament controller
pub use tournament::{
    DEFAULT_ROUND_DELAY, DEFAULT_ROUNDS, Tournament, TournamentComplete, TournamentScores, Verdict,
};
