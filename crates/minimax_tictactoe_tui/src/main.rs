//! Minimax Tic-Tac-Toe - terminal front end
//!
//! Plays a human against the alpha-beta engine, or the engine against itself.

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use minimax_tictactoe::{GameStatus, Mark, self_play};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

use app::App;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TuiConfig::load(cli.config.as_deref())?;
    init_tracing(config.log_filter());

    match cli.command.unwrap_or_default() {
        Command::Play { human } => {
            let human = human.unwrap_or(*config.human_mark());
            run_play(human, *config.show_search_time())
        }
        Command::SelfPlay => run_self_play(),
    }
}

/// Logs go to stderr so they never land on the board.
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Run the interactive terminal game
#[instrument]
fn run_play(human: Mark, show_search_time: bool) -> Result<()> {
    info!("Starting Minimax Tic-Tac-Toe TUI");

    enable_raw_mode()?;
    let mut terminal = restore_on_error(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)
        },
    )?;

    let app = App::new(human, show_search_time);
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {}", err);
    }

    res
}

/// Runs `setup`, calling `restore` before returning its error.
fn restore_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T> {
    setup().map_err(|err| {
        if let Err(restore_err) = restore() {
            warn!(error = %restore_err, "Failed to restore terminal");
        }
        err.into()
    })
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Run the engine against itself and print the game
#[instrument]
fn run_self_play() -> Result<()> {
    let record = self_play();

    for (ply, mv) in record.moves().iter().enumerate() {
        println!("{:>2}. {}", ply + 1, mv);
    }
    println!("\n{}\n", record.board());

    let result = match record.status() {
        GameStatus::Draw => "Draw",
        GameStatus::HumanWon => "X wins",
        GameStatus::AiWon => "O wins",
        GameStatus::InProgress => "Unfinished",
    };
    println!("Result: {result}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_when_setup_fails() {
        let restored = Cell::new(false);
        let res: Result<()> = restore_on_error(
            || Err(io::Error::other("no terminal")),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(res.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_restore_skipped_when_setup_succeeds() {
        let restored = Cell::new(false);
        let value = restore_on_error(
            || Ok(7),
            || {
                restored.set(true);
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(value, 7);
        assert!(!restored.get());
    }

    #[test]
    fn test_setup_error_survives_failed_restore() {
        let res: Result<()> = restore_on_error(
            || Err(io::Error::other("no terminal")),
            || Err(io::Error::other("restore failed")),
        );
        assert_eq!(res.unwrap_err().to_string(), "no terminal");
    }
}
