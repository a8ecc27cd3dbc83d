//! Game-session controller: one game from empty board to terminal
//! outcome, with the opponent's turn scheduled behind a thinking pause.

use crate::game::{Board, Difficulty, Mark, MoveError, Outcome, choose_move};
use crate::store::{GameRecord, GameResult};
use chrono::Utc;
use derive_more::{Display, Error, From};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default opponent "thinking" pause before its move is applied.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(500);

/// What the session is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// The human may submit a move.
    #[display("awaiting player move")]
    AwaitingPlayerMove,
    /// The opponent's move is pending; human input is rejected.
    #[display("awaiting opponent move")]
    AwaitingOpponentMove,
    /// Game over; only a reset is accepted.
    #[display("terminal")]
    Terminal,
}

/// Rejected session operation. State is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The move targeted an occupied or out-of-range cell.
    #[display("illegal move: {_0}")]
    IllegalMove(#[error(source)] MoveError),
    /// The session is not in a phase that accepts this operation.
    #[display("illegal transition while {_0}")]
    IllegalTransition(#[error(not(source))] Phase),
}

/// Snapshot returned after every accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Board after the move.
    pub board: Board,
    /// Outcome recomputed from the board.
    pub outcome: Outcome,
    /// Phase the session moved into.
    pub phase: Phase,
}

/// One game against the computer, driven move by move.
///
/// The human always plays X and always moves first. The phase gate is
/// the only mutual exclusion needed: while an opponent move is
/// pending, [`GameSession::submit_move`] rejects input instead of
/// queueing it.
pub struct GameSession {
    board: Board,
    phase: Phase,
    difficulty: Difficulty,
    moves: Vec<usize>,
    snapshots: Vec<Board>,
    thinking_delay: Duration,
    rng: Box<dyn RngCore + Send>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("phase", &self.phase)
            .field("difficulty", &self.difficulty)
            .field("moves", &self.moves)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session with an OS-seeded random source and the
    /// default thinking pause.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        info!(?difficulty, "Creating new game session");
        Self::with_rng(difficulty, StdRng::from_os_rng())
    }

    /// Creates a session with an explicit random source.
    pub fn with_rng(difficulty: Difficulty, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::AwaitingPlayerMove,
            difficulty,
            moves: Vec::new(),
            snapshots: Vec::new(),
            thinking_delay: DEFAULT_THINKING_DELAY,
            rng: Box::new(rng),
        }
    }

    /// Sets the opponent thinking pause. Zero is fine for tests.
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The difficulty in effect, fixed for the session.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Cells played so far, in order.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Submits the human move.
    ///
    /// # Errors
    ///
    /// [`SessionError::IllegalTransition`] outside
    /// [`Phase::AwaitingPlayerMove`]; [`SessionError::IllegalMove`] for
    /// an occupied or out-of-range cell. Either way the session is
    /// unchanged.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, cell: usize) -> Result<MoveReport, SessionError> {
        if self.phase != Phase::AwaitingPlayerMove {
            debug!(phase = %self.phase, cell, "Rejecting move out of phase");
            return Err(SessionError::IllegalTransition(self.phase));
        }
        self.play(cell, Mark::X)
    }

    /// Plays the opponent's move after the thinking pause.
    ///
    /// The pause is awaited, not fire-and-forget: the session stays in
    /// [`Phase::AwaitingOpponentMove`] for its duration, so no human
    /// move can slip in between.
    ///
    /// # Errors
    ///
    /// [`SessionError::IllegalTransition`] outside
    /// [`Phase::AwaitingOpponentMove`].
    #[instrument(skip(self))]
    pub async fn opponent_turn(&mut self) -> Result<MoveReport, SessionError> {
        if self.phase != Phase::AwaitingOpponentMove {
            debug!(phase = %self.phase, "Rejecting opponent turn out of phase");
            return Err(SessionError::IllegalTransition(self.phase));
        }
        tokio::time::sleep(self.thinking_delay).await;
        let cell = choose_move(&self.board, Mark::O, self.difficulty, &mut *self.rng);
        self.play(cell, Mark::O)
    }

    fn play(&mut self, cell: usize, mark: Mark) -> Result<MoveReport, SessionError> {
        let board = self.board.apply(cell, mark)?;
        self.board = board;
        self.moves.push(cell);
        self.snapshots.push(board);

        let outcome = board.outcome();
        self.phase = match outcome {
            Outcome::InProgress => match mark {
                Mark::X => Phase::AwaitingOpponentMove,
                Mark::O => Phase::AwaitingPlayerMove,
            },
            _ => Phase::Terminal,
        };
        info!(cell, ?mark, ?outcome, phase = %self.phase, "Move applied");

        Ok(MoveReport {
            board,
            outcome,
            phase: self.phase,
        })
    }

    /// Builds the immutable record of a finished game.
    ///
    /// # Errors
    ///
    /// [`SessionError::IllegalTransition`] unless the session is
    /// [`Phase::Terminal`].
    #[instrument(skip(self))]
    pub fn record(&self) -> Result<GameRecord, SessionError> {
        let result = GameResult::from_outcome(self.board.outcome())
            .ok_or(SessionError::IllegalTransition(self.phase))?;
        Ok(GameRecord::new(
            self.snapshots.clone(),
            self.moves.clone(),
            result,
            Utc::now(),
            self.difficulty,
        ))
    }

    /// Clears the board for a fresh game at the same difficulty.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting session");
        self.board = Board::new();
        self.phase = Phase::AwaitingPlayerMove;
        self.moves.clear();
        self.snapshots.clear();
    }
}
