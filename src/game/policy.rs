//! Difficulty-tiered move selection for the computer opponent.

use super::search;
use super::types::{Board, Mark};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Probability that a Medium opponent plays the optimal move.
const MEDIUM_OPTIMAL_ODDS: f64 = 0.7;

/// Opponent strength. Fixed for the duration of a session; changeable
/// only between sessions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random among empty cells; never consults the search.
    Easy,
    /// Optimal with probability 0.7, uniformly random otherwise. The
    /// odds are re-rolled on every move request, so a Medium opponent
    /// can blunder even from a winning position.
    #[default]
    Medium,
    /// Always optimal. Cannot be beaten, only drawn.
    Hard,
}

/// Picks the opponent's move for the given difficulty.
///
/// Pure function of the board, difficulty, and random source; the rng
/// is injected so tests can seed it.
///
/// # Panics
///
/// Panics if the board is terminal. Callers must check
/// [`Board::outcome`] first.
#[instrument(skip(board, rng))]
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> usize {
    let cell = match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => {
            if rng.random_bool(MEDIUM_OPTIMAL_ODDS) {
                search::best_move(board, mark).0
            } else {
                random_move(board, rng)
            }
        }
        Difficulty::Hard => search::best_move(board, mark).0,
    };
    debug!(cell, ?difficulty, "opponent move chosen");
    cell
}

/// Uniform choice among the empty cells.
fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> usize {
    let empty: Vec<usize> = board.empty_cells().collect();
    *empty
        .choose(rng)
        .expect("non-terminal board has an empty cell")
}
