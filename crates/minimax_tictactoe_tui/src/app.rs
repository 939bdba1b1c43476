//! Application state and key handling.

use crossterm::event::KeyCode;
use minimax_tictactoe::{GameStatus, Mark, Session};
use tracing::{debug, instrument, warn};

/// Main application state.
pub struct App {
    session: Session,
    cursor: usize,
    status_message: String,
    show_search_time: bool,
    should_quit: bool,
}

impl App {
    /// Creates a new application. If the engine holds X it opens immediately.
    #[instrument]
    pub fn new(human: Mark, show_search_time: bool) -> Self {
        let mut app = Self {
            session: Session::new(human),
            cursor: 4,
            status_message: String::new(),
            show_search_time,
            should_quit: false,
        };
        app.open_if_engine_first();
        app.refresh_status();
        app
    }

    /// Gets the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Square under the cursor (0-8).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char(c @ '1'..='9') => {
                let pos = c as usize - '1' as usize;
                self.cursor = pos;
                self.make_move(pos);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.make_move(self.cursor),
            KeyCode::Left => self.cursor = self.cursor / 3 * 3 + (self.cursor % 3 + 2) % 3,
            KeyCode::Right => self.cursor = self.cursor / 3 * 3 + (self.cursor % 3 + 1) % 3,
            KeyCode::Up => self.cursor = (self.cursor + 6) % 9,
            KeyCode::Down => self.cursor = (self.cursor + 3) % 9,
            other => debug!(?other, "Ignoring key"),
        }
    }

    /// Plays the human's mark at `position`, followed by the engine's reply.
    pub fn make_move(&mut self, position: usize) {
        debug!(position, "Making move");

        match self.session.play_human(position) {
            Ok(reply) => {
                debug!(?reply, "Engine replied");
                self.refresh_status();
            }
            Err(e) => {
                warn!(error = %e, "Move refused");
                self.status_message = format!("{}. Try again.", e.kind());
            }
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.session.reset();
        self.open_if_engine_first();
        self.refresh_status();
    }

    fn open_if_engine_first(&mut self) {
        if self.session.ai_to_move()
            && let Err(e) = self.session.ai_move()
        {
            warn!(error = %e, "Engine could not open");
        }
    }

    fn refresh_status(&mut self) {
        let session = &self.session;
        self.status_message = match session.status() {
            GameStatus::InProgress => {
                let mut msg = format!(
                    "Your turn ({}). Press 1-9 or Enter to play.",
                    session.human()
                );
                if self.show_search_time {
                    msg.push_str(&format!(
                        " Engine time: {:.4}s",
                        session.total_search_time().as_secs_f64()
                    ));
                }
                msg
            }
            GameStatus::HumanWon => {
                "You win! Press 'r' to restart or 'q' to quit.".to_string()
            }
            GameStatus::AiWon => {
                "The engine wins! Press 'r' to restart or 'q' to quit.".to_string()
            }
            GameStatus::Draw => "Draw! Press 'r' to restart or 'q' to quit.".to_string(),
        };
    }
}
