//! Persisted progress models and their transition rules.

use crate::game::{Board, Difficulty, Mark, Outcome};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Final result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    /// X (the human) completed a line.
    X,
    /// O (the computer) completed a line.
    O,
    /// Board filled with no line.
    Draw,
}

impl GameResult {
    /// Converts a terminal outcome; `None` while still in progress.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Won(Mark::X) => Some(Self::X),
            Outcome::Won(Mark::O) => Some(Self::O),
            Outcome::Draw => Some(Self::Draw),
            Outcome::InProgress => None,
        }
    }

    /// The result from the human player's perspective.
    pub fn label(&self) -> &'static str {
        match self {
            Self::X => "win",
            Self::O => "loss",
            Self::Draw => "draw",
        }
    }
}

/// Immutable log entry for one completed game.
///
/// Created once at game end and never mutated afterwards; the stored
/// history is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameRecord {
    /// Board snapshot after each move, first move onward.
    board_states: Vec<Board>,
    /// Cells played, in order. Marks alternate starting from X.
    moves: Vec<usize>,
    /// Final result.
    result: GameResult,
    /// When the game finished.
    played_at: DateTime<Utc>,
    /// Opponent difficulty in effect.
    difficulty: Difficulty,
}

impl GameRecord {
    /// The final board position.
    pub fn final_board(&self) -> Option<&Board> {
        self.board_states.last()
    }
}

/// Aggregate counters across completed games.
///
/// Everything except the current streak is monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct SessionStats {
    /// Games finished, any result.
    total_games: u32,
    /// Games the human won.
    wins: u32,
    /// Games the computer won.
    losses: u32,
    /// Drawn games.
    draws: u32,
    /// Consecutive human wins, reset by any non-win.
    current_streak: u32,
    /// Longest win streak ever reached.
    max_streak: u32,
    /// When the last game finished.
    #[serde(default)]
    last_played: Option<DateTime<Utc>>,
}

impl SessionStats {
    /// Folds one finished game into the counters.
    #[instrument(skip(self))]
    pub fn record(&mut self, result: GameResult, finished_at: DateTime<Utc>) {
        self.total_games += 1;
        match result {
            GameResult::X => {
                self.wins += 1;
                self.current_streak += 1;
            }
            GameResult::O => {
                self.losses += 1;
                self.current_streak = 0;
            }
            GameResult::Draw => {
                self.draws += 1;
                self.current_streak = 0;
            }
        }
        self.max_streak = self.max_streak.max(self.current_streak);
        self.last_played = Some(finished_at);
    }

    /// Calculates win rate as a percentage (0.0-100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

/// Local player identity shown alongside the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct PlayerProfile {
    /// Display name.
    name: String,
    /// Avatar glyph.
    avatar: String,
    /// Lifetime wins.
    wins: u32,
    /// Lifetime losses.
    losses: u32,
}

impl PlayerProfile {
    /// Folds one finished game into the profile counters. Draws leave
    /// the profile untouched.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::X => self.wins += 1,
            GameResult::O => self.losses += 1,
            GameResult::Draw => {}
        }
    }
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::new("Player".to_string(), "\u{1F464}".to_string(), 0, 0)
    }
}
