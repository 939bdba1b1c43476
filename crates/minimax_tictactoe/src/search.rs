//! Full-depth minimax with alpha-beta pruning.
//!
//! The search explores a single mutable [`Board`] in place: every
//! [`Board::place`] is paired with a [`Board::undo`] before the enclosing call
//! returns, on every path including cutoffs. Callers get their board back
//! unchanged. Do not replace this with copy-per-node recursion.

use crate::board::{Board, Mark};
use crate::error::{GameError, GameErrorKind};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Remaining depth handed to the first reply layer: the most plies a game
/// can still have.
pub const SEARCH_DEPTH: u32 = 9;

/// Base score of a won position before the depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Outcome of one top-level search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Chosen square.
    pub best_move: usize,
    /// Minimax value of the chosen square for the searching side.
    pub score: i32,
    /// Positions evaluated, including the root's children.
    pub nodes: u64,
    /// Sibling loops cut short by `beta <= alpha`.
    pub cutoffs: u64,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
}

/// Chooses the optimal move for the board's AI mark.
///
/// # Errors
///
/// Returns [`GameErrorKind::GameOver`] if the board is already won or full.
#[instrument(skip(board), fields(ai = %board.ai()))]
pub fn best_move(board: &mut Board) -> Result<usize, GameError> {
    let ai = board.ai();
    search(board, ai).map(|report| report.best_move)
}

/// Runs the search maximizing for `mark` and minimizing for its opponent.
///
/// Candidate moves are tried in ascending index order and the first move with
/// the strictly greatest score wins, so ties go to the lowest index.
///
/// # Errors
///
/// Returns [`GameErrorKind::GameOver`] if the board is already won or full.
#[instrument(skip(board), fields(occupied = board.occupied_count()))]
pub fn search(board: &mut Board, mark: Mark) -> Result<SearchReport, GameError> {
    if board.is_over() {
        return Err(GameErrorKind::GameOver.into());
    }

    let start = Instant::now();
    let mut searcher = Searcher {
        board,
        maximizer: mark,
        minimizer: mark.opponent(),
        nodes: 0,
        cutoffs: 0,
    };

    let mut best: Option<(usize, i32)> = None;
    for pos in searcher.board.legal_moves() {
        searcher.board.place(pos, mark);
        let score = searcher.alpha_beta(SEARCH_DEPTH, i32::MIN, i32::MAX, false);
        searcher.board.undo(pos);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    // Not over implies at least one empty square.
    let Some((best_move, score)) = best else {
        return Err(GameErrorKind::GameOver.into());
    };

    let report = SearchReport {
        best_move,
        score,
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
        elapsed: start.elapsed(),
    };
    info!(
        %mark,
        best_move,
        score,
        nodes = report.nodes,
        cutoffs = report.cutoffs,
        elapsed_secs = report.elapsed.as_secs_f64(),
        "Search complete"
    );
    Ok(report)
}

/// Exact score of a position for the maximizer, or `None` if play continues.
///
/// `depth` is the remaining depth: wins score `WIN_SCORE - depth`, losses
/// `depth - WIN_SCORE`, draws and exhausted depth score zero.
pub fn terminal_score(board: &Board, maximizer: Mark, depth: u32) -> Option<i32> {
    let depth = depth as i32;
    if board.is_winner(maximizer) {
        Some(WIN_SCORE - depth)
    } else if board.is_winner(maximizer.opponent()) {
        Some(depth - WIN_SCORE)
    } else if board.is_draw() || depth == 0 {
        Some(0)
    } else {
        None
    }
}

/// Per-call search state. Owns the board borrow for the duration of one search.
struct Searcher<'a> {
    board: &'a mut Board,
    maximizer: Mark,
    minimizer: Mark,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher<'_> {
    fn alpha_beta(&mut self, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;
        if let Some(score) = terminal_score(self.board, self.maximizer, depth) {
            return score;
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for pos in self.board.legal_moves() {
                self.board.place(pos, self.maximizer);
                let eval = self.alpha_beta(depth - 1, alpha, beta, false);
                self.board.undo(pos);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for pos in self.board.legal_moves() {
                self.board.place(pos, self.minimizer);
                let eval = self.alpha_beta(depth - 1, alpha, beta, true);
                self.board.undo(pos);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            min_eval
        }
    }
}
