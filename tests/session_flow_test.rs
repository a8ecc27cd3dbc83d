//! Tests for the game-session phase machine.

use std::time::Duration;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tictac_arena::{
    Difficulty, GameSession, Mark, MoveError, Outcome, Phase, SessionError, replay,
};

fn fast_session(difficulty: Difficulty) -> GameSession {
    GameSession::with_rng(difficulty, Xoshiro256PlusPlus::seed_from_u64(7))
        .with_thinking_delay(Duration::ZERO)
}

/// Plays greedy first-empty-cell moves for X until the game ends.
async fn play_out(session: &mut GameSession) {
    loop {
        match session.phase() {
            Phase::AwaitingPlayerMove => {
                let cell = session
                    .board()
                    .empty_cells()
                    .next()
                    .expect("in-progress board has an empty cell");
                session.submit_move(cell).unwrap();
            }
            Phase::AwaitingOpponentMove => {
                session.opponent_turn().await.unwrap();
            }
            Phase::Terminal => return,
        }
    }
}

#[test]
fn test_starts_awaiting_player_with_empty_board() {
    let session = fast_session(Difficulty::Medium);
    assert_eq!(session.phase(), Phase::AwaitingPlayerMove);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.board().empty_cells().count(), 9);
}

#[test]
fn test_player_move_hands_turn_to_opponent() {
    let mut session = fast_session(Difficulty::Medium);
    let report = session.submit_move(4).unwrap();
    assert_eq!(report.phase, Phase::AwaitingOpponentMove);
    assert_eq!(report.outcome, Outcome::InProgress);
    assert!(!report.board.is_empty(4));
}

#[test]
fn test_move_rejected_while_opponent_thinking() {
    let mut session = fast_session(Difficulty::Medium);
    session.submit_move(4).unwrap();

    let err = session.submit_move(0).unwrap_err();
    assert_eq!(
        err,
        SessionError::IllegalTransition(Phase::AwaitingOpponentMove)
    );
    // The rejected move left no trace.
    assert!(session.board().is_empty(0));
    assert_eq!(session.moves(), &[4]);
}

#[test]
fn test_occupied_cell_rejected_without_state_change() {
    let mut session = fast_session(Difficulty::Medium);
    session.submit_move(4).unwrap();

    // Opponent hasn't moved yet; resubmitting 4 fails on phase first.
    assert!(session.submit_move(4).is_err());
}

#[tokio::test]
async fn test_occupied_cell_is_an_illegal_move() {
    let mut session = fast_session(Difficulty::Hard);
    session.submit_move(4).unwrap();
    session.opponent_turn().await.unwrap();

    let occupied = session
        .board()
        .squares()
        .iter()
        .position(|s| *s != tictac_arena::Square::Empty)
        .unwrap();
    let err = session.submit_move(occupied).unwrap_err();
    assert_eq!(err, SessionError::IllegalMove(MoveError::Occupied(occupied)));
}

#[tokio::test]
async fn test_opponent_turn_rejected_out_of_phase() {
    let mut session = fast_session(Difficulty::Medium);
    let err = session.opponent_turn().await.unwrap_err();
    assert_eq!(
        err,
        SessionError::IllegalTransition(Phase::AwaitingPlayerMove)
    );
}

#[tokio::test]
async fn test_no_moves_accepted_after_terminal() {
    let mut session = fast_session(Difficulty::Hard);
    play_out(&mut session).await;

    assert_eq!(session.phase(), Phase::Terminal);
    let err = session.submit_move(0).unwrap_err();
    assert_eq!(err, SessionError::IllegalTransition(Phase::Terminal));
    let err = session.opponent_turn().await.unwrap_err();
    assert_eq!(err, SessionError::IllegalTransition(Phase::Terminal));
}

#[tokio::test]
async fn test_greedy_player_never_beats_hard() {
    let mut session = fast_session(Difficulty::Hard);
    play_out(&mut session).await;
    assert_ne!(session.outcome(), Outcome::Won(Mark::X));
}

#[tokio::test]
async fn test_reset_clears_board_for_a_new_game() {
    let mut session = fast_session(Difficulty::Hard);
    play_out(&mut session).await;

    session.reset();
    assert_eq!(session.phase(), Phase::AwaitingPlayerMove);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert!(session.moves().is_empty());
    assert_eq!(session.board().empty_cells().count(), 9);
    // Difficulty carries over between games.
    assert_eq!(session.difficulty(), Difficulty::Hard);
}

#[tokio::test]
async fn test_record_captures_the_finished_game() {
    let mut session = fast_session(Difficulty::Hard);

    let err = session.record().unwrap_err();
    assert!(matches!(err, SessionError::IllegalTransition(_)));

    play_out(&mut session).await;
    let record = session.record().unwrap();

    assert_eq!(record.moves(), session.moves());
    assert_eq!(record.board_states().len(), record.moves().len());
    assert_eq!(record.final_board(), Some(session.board()));
    assert_eq!(*record.difficulty(), Difficulty::Hard);

    // Replay frames rebuild exactly the recorded snapshots.
    assert_eq!(&replay::frames(&record), record.board_states());
}

#[tokio::test(start_paused = true)]
async fn test_thinking_pause_is_awaited_before_the_move() {
    let delay = Duration::from_millis(500);
    let mut session = GameSession::with_rng(
        Difficulty::Hard,
        Xoshiro256PlusPlus::seed_from_u64(7),
    )
    .with_thinking_delay(delay);

    session.submit_move(4).unwrap();
    let before = tokio::time::Instant::now();
    session.opponent_turn().await.unwrap();
    assert!(tokio::time::Instant::now() - before >= delay);
}
