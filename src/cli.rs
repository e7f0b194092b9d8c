//! Command-line interface for minigames.

use clap::{Parser, Subcommand, ValueEnum};

/// Minigames - two-player tic-tac-toe over HTTP
#[derive(Parser, Debug)]
#[command(name = "minigames")]
#[command(about = "Host or play a networked tic-tac-toe table", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Games the server can host.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// Tic-tac-toe
    #[value(name = "tictactoe")]
    TicTacToe,
    /// Sequence (not yet implemented)
    Sequence,
    /// Battleship (not yet implemented)
    Battleship,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Server {
        /// Which game to host
        #[arg(short, long, value_enum, default_value = "tictactoe")]
        game: GameKind,

        /// Host to bind to (overrides config file and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config file and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Optional TOML config file with `host` and `port`
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Join a table and print the issued token
    Join {
        /// Game server URL
        #[arg(long, default_value = "http://localhost:8090")]
        server_url: String,

        /// Display name to join under
        name: String,
    },

    /// Claim a cell (0-8, row-major)
    Move {
        /// Game server URL
        #[arg(long, default_value = "http://localhost:8090")]
        server_url: String,

        /// Name you joined under
        #[arg(long)]
        player: String,

        /// Token printed by `join`
        #[arg(long)]
        token: String,

        /// Cell index
        position: String,
    },

    /// Reset the board, keeping players
    Reset {
        /// Game server URL
        #[arg(long, default_value = "http://localhost:8090")]
        server_url: String,
    },

    /// Show the board, turn and players
    Board {
        /// Game server URL
        #[arg(long, default_value = "http://localhost:8090")]
        server_url: String,
    },
}
