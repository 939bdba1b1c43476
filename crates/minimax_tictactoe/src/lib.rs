//! Minimax Tic-Tac-Toe - a board and an opponent that never loses
//!
//! The engine plays perfectly by searching the whole game tree with
//! minimax and alpha-beta pruning. Front ends drive it through a
//! [`Session`], which owns the board and enforces turn order.
//!
//! # Architecture
//!
//! - **Board**: 9-square grid, win/draw queries, `place`/`undo` mutators
//! - **Search**: full-depth alpha-beta over a single board mutated in place
//! - **Session**: one human-vs-engine game with input validation and timing
//!
//! # Example
//!
//! ```
//! use minimax_tictactoe::{Mark, Session};
//!
//! let mut session = Session::new(Mark::X);
//! let reply = session.play_human(4).unwrap();
//! assert_eq!(reply, Some(0));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod error;
mod search;
mod session;

// Crate-level exports - Board
pub use board::{BOARD_SIZE, Board, GameStatus, LINES, Mark, Square};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Search engine
pub use search::{SEARCH_DEPTH, SearchReport, WIN_SCORE, best_move, search, terminal_score};

// Crate-level exports - Session management
pub use session::{Move, SelfPlayRecord, Session, SessionView, self_play};
