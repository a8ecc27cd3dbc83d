//! End-to-end tests driving sessions through the tournament controller.

use std::time::Duration;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tictac_arena::{
    Difficulty, GameResult, GameSession, Phase, Tournament, TournamentComplete, Verdict,
};

/// Plays one full round with greedy first-empty-cell moves for X.
async fn play_round(session: &mut GameSession) -> GameResult {
    loop {
        match session.phase() {
            Phase::AwaitingPlayerMove => {
                let cell = session.board().empty_cells().next().unwrap();
                session.submit_move(cell).unwrap();
            }
            Phase::AwaitingOpponentMove => {
                session.opponent_turn().await.unwrap();
            }
            Phase::Terminal => {
                return *session.record().unwrap().result();
            }
        }
    }
}

#[tokio::test]
async fn test_full_tournament_over_independent_rounds() {
    let rounds = 5;
    let mut tournament =
        Tournament::new(rounds, Difficulty::Hard).with_round_delay(Duration::ZERO);
    let mut session = GameSession::with_rng(
        Difficulty::Hard,
        Xoshiro256PlusPlus::seed_from_u64(99),
    )
    .with_thinking_delay(Duration::ZERO);

    while !tournament.is_complete() {
        let result = play_round(&mut session).await;
        tournament.record_round(result).unwrap();

        if !tournament.is_complete() {
            tournament.intermission().await;
            session.reset();
            // Each round starts from a fresh board.
            assert_eq!(session.board().empty_cells().count(), 9);
        }
    }

    let scores = tournament.scores();
    assert_eq!(scores.completed(), rounds);
    assert_eq!(
        scores.player_wins() + scores.computer_wins() + scores.draws(),
        rounds
    );
    // Greedy play against a perfect opponent never takes a round.
    assert_eq!(*scores.player_wins(), 0);

    let verdict = tournament.verdict().unwrap();
    if scores.computer_wins() > &0 {
        assert_eq!(verdict, Verdict::ComputerWon);
    } else {
        assert_eq!(verdict, Verdict::Drawn);
    }

    // Finalized tournaments accept no further rounds.
    assert_eq!(
        tournament.record_round(GameResult::Draw),
        Err(TournamentComplete)
    );
}

#[tokio::test]
async fn test_round_counter_advances_per_completed_round() {
    let mut tournament =
        Tournament::new(3, Difficulty::Easy).with_round_delay(Duration::ZERO);
    assert_eq!(tournament.current_round(), 1);

    tournament.record_round(GameResult::Draw).unwrap();
    assert_eq!(tournament.current_round(), 2);

    tournament.record_round(GameResult::X).unwrap();
    assert_eq!(tournament.current_round(), 3);

    tournament.record_round(GameResult::O).unwrap();
    assert!(tournament.is_complete());
    assert_eq!(tournament.verdict(), Some(Verdict::Drawn));
}
