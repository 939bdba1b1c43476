//! Error types for session input and board parsing.

use crate::board::Mark;
use tracing::instrument;

/// Specific reason an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameErrorKind {
    /// The game has already reached a terminal state.
    #[display("Game is already over")]
    GameOver,

    /// The square at the index is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// The index is not a square on the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The other side is to move.
    #[display("It's not your turn, waiting for {}", _0)]
    NotYourTurn(Mark),

    /// A board string could not be parsed.
    #[display("Invalid board: {}", _0)]
    ParseBoard(String),
}

/// Game error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// What went wrong.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}
