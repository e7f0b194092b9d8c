//! Minigames library - a networked tic-tac-toe table
//!
//! One shared 3x3 board, two seats, plain-text HTTP requests.
//!
//! # Architecture
//!
//! - **Table**: the single game state (board, turn, players, credentials)
//!   behind one lock
//! - **Server**: axum routes for join, move, reset and board queries
//! - **Client**: reqwest wrapper for playing against a remote table
//! - **Game rules**: the pure `minigames_tictactoe` crate
//!
//! # Example
//!
//! ```no_run
//! use minigames::{GameTable, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default().with_env()?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! minigames::serve(listener, GameTable::new()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod config;
mod credential;
mod error;
mod server;
mod table;

// Crate-level exports - Table state
pub use table::{GameTable, Joined, MoveOutcome, Phase, Seat, TableSnapshot, TableState};

// Crate-level exports - Errors
pub use error::TableError;

// Crate-level exports - Credentials
pub use credential::Credential;

// Crate-level exports - HTTP server
pub use server::{DEFAULT_PORT, PLAYER_HEADER, describe, join_message, move_message, router, serve};

// Crate-level exports - HTTP client
pub use client::{ClientError, JoinTicket, TableClient};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use minigames_tictactoe::{
    Board, Cell, Game, GameStatus, MoveError, Position, PositionError, Role, render_board,
};
