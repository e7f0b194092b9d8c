//! Pure tic-tac-toe game logic.
//!
//! Board storage, the two roles, flat cell addressing, win/draw rules and
//! the `TIC | TAC | TOE` table renderer. Nothing here does I/O; the server
//! crate wraps a [`Game`] with player identity and HTTP.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod position;
mod render;
mod types;

pub mod rules;

pub use game::{Game, MoveError};
pub use position::{Position, PositionError};
pub use render::{HEADERS, render_board};
pub use types::{Board, Cell, GameStatus, Role};
