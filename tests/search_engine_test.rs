//! Adversarial tests for the minimax engine.

use tictac_arena::{Board, Mark, Outcome, best_move};

/// X tries every possible move at every turn while O answers with the
/// search engine. No branch may end in an X win.
fn explore(board: Board) {
    match board.outcome() {
        Outcome::Won(mark) => assert_ne!(mark, Mark::X, "optimal O lost: {board:?}"),
        Outcome::Draw => {}
        Outcome::InProgress => {
            let cells: Vec<usize> = board.empty_cells().collect();
            for cell in cells {
                let after_x = board.apply(cell, Mark::X).unwrap();
                match after_x.outcome() {
                    Outcome::Won(mark) => {
                        assert_ne!(mark, Mark::X, "optimal O allowed an X win: {after_x:?}");
                    }
                    Outcome::Draw => {}
                    Outcome::InProgress => {
                        let (reply, _) = best_move(&after_x, Mark::O);
                        explore(after_x.apply(reply, Mark::O).unwrap());
                    }
                }
            }
        }
    }
}

#[test]
fn test_optimal_opponent_is_unbeatable() {
    explore(Board::new());
}

#[test]
fn test_two_optimal_players_draw() {
    // X and O both search; perfect play from the empty board is a draw.
    let mut board = Board::new();
    let mut mark = Mark::X;
    while board.outcome() == Outcome::InProgress {
        let (cell, _) = best_move(&board, mark);
        board = board.apply(cell, mark).unwrap();
        mark = mark.opponent();
    }
    assert_eq!(board.outcome(), Outcome::Draw);
}

#[test]
fn test_known_draw_sequence_terminates_in_draw() {
    // A full game with no winner; every prefix stays in progress.
    let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    let mut board = Board::new();
    let mut mark = Mark::X;
    for (i, &cell) in moves.iter().enumerate() {
        board = board.apply(cell, mark).unwrap();
        if i < moves.len() - 1 {
            assert_eq!(board.outcome(), Outcome::InProgress, "ended early at move {i}");
        }
        mark = mark.opponent();
    }
    assert_eq!(board.outcome(), Outcome::Draw);
}
