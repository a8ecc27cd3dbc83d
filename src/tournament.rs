//! Tournament controller: a fixed-length series of independent games
//! against the same opponent, with aggregated results.

use crate::game::Difficulty;
use crate::store::GameResult;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default number of rounds ("best of 5").
pub const DEFAULT_ROUNDS: u32 = 5;

/// Default pause between a round's end and the next round's start.
pub const DEFAULT_ROUND_DELAY: Duration = Duration::from_millis(1500);

/// Per-round outcome tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct TournamentScores {
    /// Rounds the human won.
    player_wins: u32,
    /// Rounds the computer won.
    computer_wins: u32,
    /// Drawn rounds.
    draws: u32,
}

impl TournamentScores {
    /// Rounds tallied so far.
    pub fn completed(&self) -> u32 {
        self.player_wins + self.computer_wins + self.draws
    }
}

/// Overall tournament result.
///
/// A tie in round wins is reported distinctly from either side's
/// majority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The human took more rounds than the computer.
    PlayerWon,
    /// The computer took more rounds than the human.
    ComputerWon,
    /// Equal round wins.
    Drawn,
}

/// Attempt to tally a round into a finished tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("tournament already complete")]
pub struct TournamentComplete;

/// Runs a fixed number of independent rounds at one difficulty.
///
/// No board state carries over between rounds; every round is a fresh
/// game tallied here once it reaches a terminal outcome.
#[derive(Debug, Clone, Getters)]
pub struct Tournament {
    /// Configured round count.
    rounds: u32,
    /// Opponent difficulty, the same for every round.
    difficulty: Difficulty,
    /// Tally of finished rounds.
    scores: TournamentScores,
    #[getter(skip)]
    round_delay: Duration,
}

impl Tournament {
    /// Creates a tournament of `rounds` rounds.
    #[instrument]
    pub fn new(rounds: u32, difficulty: Difficulty) -> Self {
        info!(rounds, ?difficulty, "Starting tournament");
        Self {
            rounds,
            difficulty,
            scores: TournamentScores::default(),
            round_delay: DEFAULT_ROUND_DELAY,
        }
    }

    /// Sets the inter-round pause. Zero is fine for tests.
    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay = delay;
        self
    }

    /// 1-based number of the round currently being played.
    pub fn current_round(&self) -> u32 {
        (self.scores.completed() + 1).min(self.rounds.max(1))
    }

    /// True once every configured round has been tallied.
    pub fn is_complete(&self) -> bool {
        self.scores.completed() >= self.rounds
    }

    /// Tallies a finished round.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentComplete`] once all rounds are tallied.
    #[instrument(skip(self))]
    pub fn record_round(&mut self, result: GameResult) -> Result<(), TournamentComplete> {
        if self.is_complete() {
            return Err(TournamentComplete);
        }
        match result {
            GameResult::X => self.scores.player_wins += 1,
            GameResult::O => self.scores.computer_wins += 1,
            GameResult::Draw => self.scores.draws += 1,
        }
        debug!(
            completed = self.scores.completed(),
            of = self.rounds,
            ?result,
            "Round tallied"
        );
        Ok(())
    }

    /// Final three-way verdict; `None` until the tournament completes.
    pub fn verdict(&self) -> Option<Verdict> {
        if !self.is_complete() {
            return None;
        }
        let scores = &self.scores;
        Some(if scores.player_wins > scores.computer_wins {
            Verdict::PlayerWon
        } else if scores.player_wins < scores.computer_wins {
            Verdict::ComputerWon
        } else {
            Verdict::Drawn
        })
    }

    /// Pause separating a round's end from the next round's start,
    /// mirroring the per-move thinking pause.
    pub async fn intermission(&self) {
        tokio::time::sleep(self.round_delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_sums_to_completed_rounds() {
        let mut t = Tournament::new(5, Difficulty::Hard);
        for result in [
            GameResult::X,
            GameResult::Draw,
            GameResult::O,
            GameResult::X,
        ] {
            t.record_round(result).unwrap();
        }
        assert_eq!(t.scores().completed(), 4);
        assert!(!t.is_complete());
        assert_eq!(t.verdict(), None);
        assert_eq!(t.current_round(), 5);
    }

    #[test]
    fn test_finalizes_exactly_at_round_count() {
        let mut t = Tournament::new(3, Difficulty::Easy);
        t.record_round(GameResult::X).unwrap();
        t.record_round(GameResult::O).unwrap();
        assert!(!t.is_complete());
        t.record_round(GameResult::X).unwrap();
        assert!(t.is_complete());
        assert_eq!(t.verdict(), Some(Verdict::PlayerWon));
        assert_eq!(
            t.record_round(GameResult::Draw),
            Err(TournamentComplete)
        );
    }

    #[test]
    fn test_three_way_verdict() {
        let mut t = Tournament::new(2, Difficulty::Medium);
        t.record_round(GameResult::X).unwrap();
        t.record_round(GameResult::O).unwrap();
        assert_eq!(t.verdict(), Some(Verdict::Drawn));

        let mut t = Tournament::new(2, Difficulty::Medium);
        t.record_round(GameResult::O).unwrap();
        t.record_round(GameResult::Draw).unwrap();
        assert_eq!(t.verdict(), Some(Verdict::ComputerWon));
    }
}
