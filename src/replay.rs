//! Move-by-move replay of recorded games.

use crate::game::{Board, Mark};
use crate::store::GameRecord;
use std::time::Duration;
use tracing::{instrument, warn};

/// Rebuilds the board after each move of a recorded game.
///
/// Marks alternate starting from X, the fixed assignment every session
/// uses, so the frames match the record's stored snapshots. A move
/// that does not fit the board (possible only with hand-edited
/// storage) is skipped with a warning rather than aborting the replay.
pub fn frames(record: &GameRecord) -> Vec<Board> {
    let mut boards = Vec::with_capacity(record.moves().len());
    let mut board = Board::new();
    let mut mark = Mark::X;
    for &cell in record.moves() {
        match board.apply(cell, mark) {
            Ok(next) => {
                board = next;
                boards.push(next);
                mark = mark.opponent();
            }
            Err(e) => warn!(cell, error = %e, "Skipping invalid recorded move"),
        }
    }
    boards
}

/// Plays a record back with a pause between frames, feeding each board
/// to `present`.
#[instrument(skip(record, present))]
pub async fn run<F>(record: &GameRecord, step: Duration, mut present: F)
where
    F: FnMut(&Board),
{
    for board in frames(record) {
        present(&board);
        tokio::time::sleep(step).await;
    }
}
