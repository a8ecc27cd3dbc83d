//! Core domain types for the tic-tac-toe board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A player's mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The human player's mark. X always moves first.
    X,
    /// The computer opponent's mark.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Display symbol for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// Number of squares on the board.
pub const CELLS: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A rejected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Cell index outside `0..9`.
    #[display("cell {_0} is out of range")]
    OutOfRange(#[error(not(source))] usize),
    /// Cell already holds a mark.
    #[display("cell {_0} is already occupied")]
    Occupied(#[error(not(source))] usize),
}

/// Result of evaluating a board.
///
/// Always recomputed from the squares, never cached alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Three in a line for the given mark.
    Won(Mark),
    /// Board full with no line completed.
    Draw,
    /// At least one empty square and no line completed.
    InProgress,
}

impl Outcome {
    /// True once the board can accept no further moves.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// 3x3 tic-tac-toe board.
///
/// `Copy` value semantics: the search recurses over board copies
/// rather than mutating and backtracking a shared grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELLS],
        }
    }

    /// Creates a board from an explicit square layout.
    pub fn from_squares(squares: [Square; CELLS]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Indices of all empty squares, in board order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(pos, _)| pos)
    }

    /// Returns a new board with `mark` placed at `pos`.
    ///
    /// The input board is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if `pos` is out of range or occupied.
    pub fn apply(&self, pos: usize, mark: Mark) -> Result<Board, MoveError> {
        if pos >= CELLS {
            return Err(MoveError::OutOfRange(pos));
        }
        if !self.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }
        Ok(self.place(pos, mark))
    }

    /// Places a mark on a square known to be empty.
    pub(crate) fn place(mut self, pos: usize, mark: Mark) -> Board {
        debug_assert!(self.is_empty(pos), "place on occupied cell {pos}");
        self.squares[pos] = Square::Occupied(mark);
        self
    }

    /// Checks for a completed line on the board.
    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in LINES {
            let sq = self.squares[a];
            if sq != Square::Empty && sq == self.squares[b] && sq == self.squares[c] {
                return match sq {
                    Square::Occupied(mark) => Some(mark),
                    Square::Empty => None,
                };
            }
        }
        None
    }

    /// Evaluates the board: win, draw, or still in progress.
    pub fn outcome(&self) -> Outcome {
        if let Some(mark) = self.winner() {
            Outcome::Won(mark)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
