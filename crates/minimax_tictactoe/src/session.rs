//! Single-game session owned by a front end.
//!
//! A session replaces the global game state a UI would otherwise keep alive
//! across re-renders. It is the guard the bare [`Board`] lacks: it refuses
//! input after the game ends, on occupied squares and out of turn.

use crate::board::{BOARD_SIZE, Board, GameStatus, Mark, Square};
use crate::error::{GameError, GameErrorKind};
use crate::search::{self, SearchReport};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// The square it was placed on (0-8).
    pub position: usize,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// A human-vs-engine game.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    to_move: Mark,
    history: Vec<Move>,
    total_search_time: Duration,
    last_search: Option<SearchReport>,
}

impl Session {
    /// Creates a session with the human playing `human`. X moves first.
    #[instrument]
    pub fn new(human: Mark) -> Self {
        info!(%human, "Creating new session");
        Self {
            board: Board::with_human(human),
            to_move: Mark::X,
            history: Vec::new(),
            total_search_time: Duration::ZERO,
            last_search: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// True once the game has a winner or the board is full.
    pub fn is_over(&self) -> bool {
        self.board.is_over()
    }

    /// The mark to move next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.board.human()
    }

    /// The engine's mark.
    pub fn ai(&self) -> Mark {
        self.board.ai()
    }

    /// True when the game is running and the engine is to move.
    pub fn ai_to_move(&self) -> bool {
        !self.is_over() && self.to_move == self.ai()
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Search time accumulated over every engine move this session.
    pub fn total_search_time(&self) -> Duration {
        self.total_search_time
    }

    /// Report of the most recent engine search.
    pub fn last_search(&self) -> Option<&SearchReport> {
        self.last_search.as_ref()
    }

    /// Plays the human's mark at `pos`, then the engine's reply if the game
    /// is still running.
    ///
    /// Returns the engine's reply, or `None` if the human's move ended the game.
    ///
    /// # Errors
    ///
    /// Refuses the move with [`GameErrorKind::GameOver`],
    /// [`GameErrorKind::OutOfBounds`], [`GameErrorKind::SquareOccupied`] or
    /// [`GameErrorKind::NotYourTurn`]. A refused move leaves the session
    /// unchanged.
    #[instrument(skip(self), fields(human = %self.human()))]
    pub fn play_human(&mut self, pos: usize) -> Result<Option<usize>, GameError> {
        self.check_move(pos, self.human())?;
        self.apply(pos, self.human());

        if self.is_over() {
            info!(status = ?self.status(), "Game over after human move");
            return Ok(None);
        }

        self.ai_move().map(Some)
    }

    /// Runs the engine and plays its move.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::GameOver`] once the game has ended and
    /// [`GameErrorKind::NotYourTurn`] when the human is to move.
    #[instrument(skip(self), fields(ai = %self.ai()))]
    pub fn ai_move(&mut self) -> Result<usize, GameError> {
        let ai = self.ai();
        if self.is_over() {
            warn!("Engine asked to move in a finished game");
            return Err(GameErrorKind::GameOver.into());
        }
        if self.to_move != ai {
            warn!(to_move = %self.to_move, "Engine asked to move out of turn");
            return Err(GameErrorKind::NotYourTurn(self.to_move).into());
        }

        let report = search::search(&mut self.board, ai)?;
        let pos = report.best_move;
        self.total_search_time += report.elapsed;
        debug!(
            pos,
            total_search_secs = self.total_search_time.as_secs_f64(),
            "Engine move chosen"
        );
        self.last_search = Some(report);
        self.apply(pos, ai);
        Ok(pos)
    }

    /// Discards the game and starts a fresh one with the same marks.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting session");
        *self = Self::new(self.human());
    }

    /// Serializable snapshot for rendering.
    pub fn view(&self) -> SessionView {
        SessionView {
            squares: *self.board.squares(),
            status: self.status(),
            to_move: self.to_move,
            human: self.human(),
            ai: self.ai(),
            total_search_secs: self.total_search_time.as_secs_f64(),
        }
    }

    fn check_move(&self, pos: usize, mark: Mark) -> Result<(), GameError> {
        if self.is_over() {
            warn!(pos, "Move attempted after game over");
            return Err(GameErrorKind::GameOver.into());
        }
        match self.board.get(pos) {
            None => {
                warn!(pos, "Move out of bounds");
                Err(GameErrorKind::OutOfBounds(pos).into())
            }
            Some(Square::Occupied(_)) => {
                warn!(pos, "Move on occupied square");
                Err(GameErrorKind::SquareOccupied(pos).into())
            }
            Some(Square::Empty) if self.to_move != mark => {
                warn!(pos, %mark, to_move = %self.to_move, "Move out of turn");
                Err(GameErrorKind::NotYourTurn(self.to_move).into())
            }
            Some(Square::Empty) => Ok(()),
        }
    }

    fn apply(&mut self, pos: usize, mark: Mark) {
        self.board.place(pos, mark);
        self.history.push(Move { mark, position: pos });
        self.to_move = mark.opponent();
        debug!(pos, %mark, status = ?self.status(), "Move applied");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

/// What a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Squares in row-major order.
    pub squares: [Square; BOARD_SIZE],
    /// Current status.
    pub status: GameStatus,
    /// Mark to move next.
    pub to_move: Mark,
    /// The human's mark.
    pub human: Mark,
    /// The engine's mark.
    pub ai: Mark,
    /// Accumulated engine thinking time in seconds.
    pub total_search_secs: f64,
}

/// Record of an engine-vs-engine game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SelfPlayRecord {
    /// Moves in order, X first.
    moves: Vec<Move>,
    /// Final board.
    board: Board,
    /// Final status, from the perspective of a human holding X.
    status: GameStatus,
}

/// Plays the engine against itself from an empty board.
///
/// Both sides use the same full-depth search, so the game always ends drawn.
#[instrument]
pub fn self_play() -> SelfPlayRecord {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    let mut moves = Vec::new();

    while !board.is_over() {
        let report = match search::search(&mut board, to_move) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Self-play search refused");
                break;
            }
        };
        board.place(report.best_move, to_move);
        moves.push(Move {
            mark: to_move,
            position: report.best_move,
        });
        debug!(mark = %to_move, position = report.best_move, "Self-play move");
        to_move = to_move.opponent();
    }

    let status = board.status();
    info!(?status, moves = moves.len(), "Self-play finished");
    SelfPlayRecord {
        moves,
        board,
        status,
    }
}
