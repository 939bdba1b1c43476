//! Command-line interface for minimax_tictactoe.

use clap::{Parser, Subcommand};
use minimax_tictactoe::Mark;
use std::path::PathBuf;

/// Minimax Tic-Tac-Toe - play against an opponent that never loses
#[derive(Parser, Debug)]
#[command(name = "minimax_tictactoe")]
#[command(about = "Play tic-tac-toe against a full-depth alpha-beta engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play against the engine in the terminal
    Play {
        /// Mark the human plays (x or o); X always moves first
        #[arg(long)]
        human: Option<Mark>,
    },

    /// Let the engine play itself and print the game
    SelfPlay,
}

impl Default for Command {
    fn default() -> Self {
        Command::Play { human: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::try_parse_from(["minimax_tictactoe"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Play { human: None });
    }

    #[test]
    fn test_parses_human_mark() {
        let cli = Cli::try_parse_from(["minimax_tictactoe", "play", "--human", "o"]).unwrap();
        assert_eq!(cli.command, Some(Command::Play { human: Some(Mark::O) }));
    }

    #[test]
    fn test_rejects_unknown_mark() {
        assert!(Cli::try_parse_from(["minimax_tictactoe", "play", "--human", "z"]).is_err());
    }

    #[test]
    fn test_self_play_with_config() {
        let cli =
            Cli::try_parse_from(["minimax_tictactoe", "self-play", "--config", "game.toml"])
                .unwrap();
        assert_eq!(cli.command, Some(Command::SelfPlay));
        assert_eq!(cli.config, Some(PathBuf::from("game.toml")));
    }
}
