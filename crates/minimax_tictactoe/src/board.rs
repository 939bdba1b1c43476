//! Core board types for tic-tac-toe.
//!
//! The board is the only mutable state the search touches. Search explores
//! positions by calling [`Board::place`] and [`Board::undo`] in strict pairs on
//! a single board instead of copying it per node, so every caller that mutates
//! during exploration must leave the board exactly as it found it.

use crate::error::{GameError, GameErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// The eight winning triples: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
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
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// Status of a game, derived from the board.
///
/// `InProgress` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// The human completed a line.
    HumanWon,
    /// The AI completed a line.
    AiWon,
    /// The board is full with no line completed.
    Draw,
}

impl GameStatus {
    /// Returns true for every state except `InProgress`.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// 3x3 tic-tac-toe board with fixed human and AI marks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
    human: Mark,
    ai: Mark,
}

impl Board {
    /// Creates an empty board with the human playing X and the AI playing O.
    pub fn new() -> Self {
        Self::with_human(Mark::X)
    }

    /// Creates an empty board with the human playing `human`.
    ///
    /// The AI always takes the opposing mark.
    pub fn with_human(human: Mark) -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
            human,
            ai: human.opponent(),
        }
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// The AI's mark.
    pub fn ai(&self) -> Mark {
        self.ai
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty. Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// True iff `mark` occupies all three squares of any line.
    pub fn is_winner(&self, mark: Mark) -> bool {
        let target = Square::Occupied(mark);
        LINES
            .iter()
            .any(|line| line.iter().all(|&pos| self.squares[pos] == target))
    }

    /// Returns the mark that completed a line, if any.
    pub fn winner(&self) -> Option<Mark> {
        if self.is_winner(self.human) {
            Some(self.human)
        } else if self.is_winner(self.ai) {
            Some(self.ai)
        } else {
            None
        }
    }

    /// True iff no square is empty.
    ///
    /// A winning final move also fills the board, so check for a winner first.
    pub fn is_draw(&self) -> bool {
        !self.squares.contains(&Square::Empty)
    }

    /// True iff either side has won or the board is full.
    pub fn is_over(&self) -> bool {
        self.is_winner(self.human) || self.is_winner(self.ai) || self.is_draw()
    }

    /// Empty positions in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Derives the game status. A win takes precedence over a full board.
    pub fn status(&self) -> GameStatus {
        if self.is_winner(self.human) {
            GameStatus::HumanWon
        } else if self.is_winner(self.ai) {
            GameStatus::AiWon
        } else if self.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|sq| **sq != Square::Empty).count()
    }

    /// Places `mark` at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range or the square is occupied. Both are
    /// caller bugs; validated input goes through [`crate::Session`].
    pub fn place(&mut self, pos: usize, mark: Mark) {
        assert!(
            self.is_empty(pos),
            "place({pos}, {mark}) on a non-empty or out-of-range square"
        );
        self.squares[pos] = Square::Occupied(mark);
    }

    /// Clears `pos`, reversing a prior [`Board::place`].
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range. Debug builds also panic if the square
    /// was already empty.
    pub fn undo(&mut self, pos: usize) {
        debug_assert!(
            self.squares[pos] != Square::Empty,
            "undo({pos}) on an empty square"
        );
        self.squares[pos] = Square::Empty;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(mark) => write!(f, "{mark}")?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Parses nine cell characters into a board with the human playing X.
///
/// `X`/`O` (any case) are marks and `.`, `_`, `-` are empty squares. Row
/// separators `/`, `|` and whitespace are ignored.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut pos = 0;
        for c in s.chars() {
            let square = match c {
                '/' | '|' => continue,
                c if c.is_whitespace() => continue,
                '.' | '_' | '-' => Square::Empty,
                'X' | 'x' => Square::Occupied(Mark::X),
                'O' | 'o' => Square::Occupied(Mark::O),
                other => {
                    return Err(GameErrorKind::ParseBoard(format!(
                        "unexpected character '{other}' in '{s}'"
                    ))
                    .into());
                }
            };
            if pos >= BOARD_SIZE {
                return Err(GameErrorKind::ParseBoard(format!(
                    "more than {BOARD_SIZE} squares in '{s}'"
                ))
                .into());
            }
            board.squares[pos] = square;
            pos += 1;
        }
        if pos != BOARD_SIZE {
            return Err(GameErrorKind::ParseBoard(format!(
                "expected {BOARD_SIZE} squares, got {pos} in '{s}'"
            ))
            .into());
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_over());
        assert_eq!(board.status(), GameStatus::InProgress);
        for mark in Mark::iter() {
            assert!(!board.is_winner(mark));
        }
    }

    #[test]
    fn test_marks_are_opposed() {
        for human in Mark::iter() {
            let board = Board::with_human(human);
            assert_eq!(board.human(), human);
            assert_ne!(board.human(), board.ai());
        }
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut board = Board::new();
            for pos in line {
                board.place(pos, Mark::O);
            }
            assert!(board.is_winner(Mark::O), "line {line:?}");
            assert!(!board.is_winner(Mark::X));
            assert_eq!(board.status(), GameStatus::AiWon);
        }
    }

    #[test]
    fn test_lines_are_rows_columns_then_diagonals() {
        let rows: Vec<[usize; 3]> = (0..3).map(|r| [r * 3, r * 3 + 1, r * 3 + 2]).collect();
        let cols: Vec<[usize; 3]> = (0..3).map(|c| [c, c + 3, c + 6]).collect();
        assert_eq!(&LINES[..3], rows.as_slice());
        assert_eq!(&LINES[3..6], cols.as_slice());
        assert_eq!(&LINES[6..], &[[0, 4, 8], [2, 4, 6]]);
    }

    #[test]
    fn test_incomplete_line_is_not_a_win() {
        let mut board = Board::new();
        board.place(0, Mark::X);
        board.place(1, Mark::X);
        board.place(2, Mark::O);
        assert!(!board.is_winner(Mark::X));
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_winning_final_move_fills_board() {
        // X wins on the last square, so the board is both full and won.
        let board: Board = "XOX/OXO/OXX".parse().unwrap();
        assert!(board.is_draw());
        assert!(board.is_winner(Mark::X));
        assert_eq!(board.status(), GameStatus::HumanWon);
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(board.winner(), None);
        assert!(board.is_draw());
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.status(), GameStatus::Draw);
    }

    #[test]
    fn test_place_then_undo_restores_square() {
        let mut board: Board = "X.O/.X./...".parse().unwrap();
        let before = board.clone();
        for pos in before.legal_moves() {
            board.place(pos, Mark::O);
            assert_eq!(board.get(pos), Some(Square::Occupied(Mark::O)));
            board.undo(pos);
            assert_eq!(board, before);
        }
    }

    #[test]
    #[should_panic]
    fn test_place_on_occupied_panics() {
        let mut board = Board::new();
        board.place(4, Mark::X);
        board.place(4, Mark::O);
    }

    #[test]
    #[should_panic]
    fn test_place_out_of_range_panics() {
        let mut board = Board::new();
        board.place(9, Mark::X);
    }

    #[test]
    fn test_display() {
        let board: Board = "X../.O./...".parse().unwrap();
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "XO?......".parse::<Board>().map_err(|e| e.kind),
            Err(GameErrorKind::ParseBoard(_))
        ));
        assert!("XO".parse::<Board>().is_err());
        assert!("..........".parse::<Board>().is_err());
    }

    #[test]
    fn test_mark_parses_case_insensitively() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert!("z".parse::<Mark>().is_err());
    }
}
