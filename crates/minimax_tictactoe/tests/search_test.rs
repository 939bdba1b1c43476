//! End-to-end behaviour of the move search.

use minimax_tictactoe::{
    Board, GameErrorKind, Mark, SEARCH_DEPTH, WIN_SCORE, best_move, search,
};

const CORNERS: [usize; 4] = [0, 2, 6, 8];

#[test]
fn test_empty_board_picks_first_corner() {
    let mut board = Board::new();
    let ai = board.ai();
    let report = search(&mut board, ai).unwrap();
    assert_eq!(report.best_move, 0);
    // Every opening is a draw under perfect play.
    assert_eq!(report.score, 0);
    assert_eq!(board, Board::new());
}

#[test]
fn test_centre_opening_gets_corner_reply() {
    let mut board = Board::new();
    board.place(4, Mark::X);
    let reply = best_move(&mut board).unwrap();
    assert!(CORNERS.contains(&reply), "edge reply {reply} loses");
    assert_eq!(reply, 0);
}

#[test]
fn test_edge_replies_to_centre_lose() {
    for edge in [1, 3, 5, 7] {
        let mut board = Board::new();
        board.place(4, Mark::X);
        board.place(edge, Mark::O);
        // X to move; searching for X finds a forced win.
        let report = search(&mut board, Mark::X).unwrap();
        assert!(report.score > 0, "edge {edge}: score {}", report.score);
    }
}

#[test]
fn test_blocks_diagonal_threat() {
    // X threatens 2-4-6; only 6 saves the game.
    let mut board: Board = "XOX/OXO/..O".parse().unwrap();
    let before = board.clone();
    let report = search(&mut board, Mark::O).unwrap();
    assert_eq!(report.best_move, 6);
    assert_eq!(report.score, 0);
    assert_eq!(board, before);
}

#[test]
fn test_takes_only_winning_move() {
    // O completes the top row at 2; anything else at best draws.
    let mut board: Board = "OO./XX./..X".parse().unwrap();
    let report = search(&mut board, Mark::O).unwrap();
    assert_eq!(report.best_move, 2);
    assert_eq!(report.score, WIN_SCORE - SEARCH_DEPTH as i32);

    board.place(report.best_move, Mark::O);
    assert!(board.is_winner(Mark::O));
}

#[test]
fn test_rejects_won_board() {
    let mut board: Board = "XXX/OO./...".parse().unwrap();
    assert!(board.is_winner(board.human()));
    let err = best_move(&mut board).unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::GameOver);
}

#[test]
fn test_rejects_full_board() {
    let mut board: Board = "XOX/XOO/OXX".parse().unwrap();
    let err = best_move(&mut board).unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::GameOver);
}

#[test]
fn test_search_is_deterministic() {
    let mut board: Board = "X../.O./..X".parse().unwrap();
    let first = search(&mut board, Mark::O).unwrap();
    let second = search(&mut board, Mark::O).unwrap();
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.cutoffs, second.cutoffs);
}
