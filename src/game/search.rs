//! Exhaustive minimax search for the computer opponent.
//!
//! The board is small enough (at most 9 plies) that the search always
//! expands to terminal outcomes; there is no depth cutoff.

use super::types::{Board, Mark, Outcome};
use tracing::{debug, instrument};

/// Base score of a terminal win, before depth adjustment.
const WIN_SCORE: i32 = 10;

/// Finds the score-optimal move for `maximizer` on the given board.
///
/// Returns the chosen cell and its minimax score. A win for the
/// maximizer scores `10 - depth`, a loss `depth - 10`, a draw `0`;
/// the depth adjustment prefers faster wins and slower losses, which
/// breaks ties among equally-winning lines.
///
/// # Panics
///
/// Panics if the board is already terminal. Callers must check
/// [`Board::outcome`] first; searching a finished game is a
/// programming error, not a recoverable condition.
#[instrument(skip(board))]
pub fn best_move(board: &Board, maximizer: Mark) -> (usize, i32) {
    assert!(
        board.outcome() == Outcome::InProgress,
        "best_move invoked on a terminal board"
    );

    let mut best: Option<(usize, i32)> = None;
    for cell in board.empty_cells() {
        let score = minimax(board.place(cell, maximizer), 0, false, maximizer);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((cell, score));
        }
    }

    let (cell, score) = best.expect("non-terminal board has an empty cell");
    debug!(cell, score, ?maximizer, "search complete");
    (cell, score)
}

/// Scores one node of the game tree.
///
/// `maximizing` alternates per ply; the mark placed at each ply is the
/// maximizer's on maximizing plies and the opponent's otherwise. Each
/// child is explored on its own board copy.
fn minimax(board: Board, depth: i32, maximizing: bool, maximizer: Mark) -> i32 {
    match board.outcome() {
        Outcome::Won(mark) if mark == maximizer => WIN_SCORE - depth,
        Outcome::Won(_) => depth - WIN_SCORE,
        Outcome::Draw => 0,
        Outcome::InProgress => {
            let mover = if maximizing {
                maximizer
            } else {
                maximizer.opponent()
            };
            let mut best = if maximizing { i32::MIN } else { i32::MAX };
            for cell in board.empty_cells() {
                let score = minimax(board.place(cell, mover), depth + 1, !maximizing, maximizer);
                best = if maximizing {
                    best.max(score)
                } else {
                    best.min(score)
                };
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Square;

    fn board(cells: [Option<Mark>; 9]) -> Board {
        Board::from_squares(cells.map(|c| match c {
            Some(mark) => Square::Occupied(mark),
            None => Square::Empty,
        }))
    }

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn test_takes_immediate_win() {
        // O completes the top row rather than anything slower.
        let b = board([O, O, E, X, X, E, X, E, E]);
        let (cell, score) = best_move(&b, Mark::O);
        assert_eq!(cell, 2);
        assert_eq!(score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_opponent_win() {
        // X threatens the top row at 2; O has no win of its own.
        let b = board([X, X, E, E, O, E, E, E, E]);
        let (cell, _) = best_move(&b, Mark::O);
        assert_eq!(cell, 2);
    }

    #[test]
    fn test_prefers_faster_of_two_wins() {
        // Cell 3 forks (two threats, wins two plies later, score 8) and
        // sits earlier in scan order; cell 8 completes the 0-4-8
        // diagonal right now (score 10). The depth adjustment must
        // override the index tie-break and pick the immediate win.
        let b = board([O, X, X, E, O, E, E, X, E]);
        assert_eq!(minimax(b.place(3, Mark::O), 0, false, Mark::O), 8);
        let (cell, score) = best_move(&b, Mark::O);
        assert_eq!(cell, 8);
        assert_eq!(score, WIN_SCORE);
    }

    #[test]
    fn test_maximizer_is_a_parameter() {
        // X as maximizer completes its own top row.
        let b = board([X, X, E, E, O, E, E, E, E]);
        let (cell, score) = best_move(&b, Mark::X);
        assert_eq!(cell, 2);
        assert_eq!(score, WIN_SCORE);
    }

    #[test]
    fn test_opening_reply_from_full_search() {
        // First O reply to X in a corner: only the center avoids a
        // forced loss.
        let b = Board::new().place(0, Mark::X);
        let (cell, score) = best_move(&b, Mark::O);
        assert_eq!(cell, 4);
        assert_eq!(score, 0);
    }

    #[test]
    #[should_panic(expected = "terminal board")]
    fn test_panics_on_terminal_board() {
        let b = board([X, X, X, O, O, E, E, E, E]);
        best_move(&b, Mark::O);
    }
}
