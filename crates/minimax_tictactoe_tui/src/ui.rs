//! Stateless UI rendering for the game.

use minimax_tictactoe::{Board, Mark, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Renders title, board with cursor highlight and status bar.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Minimax Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app.session().board(), app.cursor());

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: usize) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    draw_row(frame, rows[0], board, cursor, 0);
    draw_separator(frame, rows[1]);
    draw_row(frame, rows[2], board, cursor, 3);
    draw_separator(frame, rows[3]);
    draw_row(frame, rows[4], board, cursor, 6);
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: usize, start: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], board, cursor, start);
    draw_vertical_separator(frame, cols[1]);
    draw_cell(frame, cols[2], board, cursor, start + 1);
    draw_vertical_separator(frame, cols[3]);
    draw_cell(frame, cols[4], board, cursor, start + 2);
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: usize, pos: usize) {
    let (text, mut style) = match board.get(pos) {
        Some(Square::Occupied(Mark::X)) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Square::Occupied(Mark::O)) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        _ => (format!("{}", pos + 1), Style::default().fg(Color::DarkGray)),
    };
    if pos == cursor && !board.is_over() {
        style = style.add_modifier(Modifier::REVERSED);
    }

    // Vertically centre the mark in the 3-line cell.
    let paragraph = Paragraph::new(format!("\n{text}"))
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_vertical_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(horizontal[1])[1]
}
