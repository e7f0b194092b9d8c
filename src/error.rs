//! Errors returned by table operations.

use derive_more::{Display, Error};
use minigames_tictactoe::{MoveError, PositionError};

/// Why a join, move or other table operation was rejected.
///
/// Every variant is terminal for the single request that caused it; the
/// table is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TableError {
    /// Malformed input: empty name, non-integer or out-of-range cell.
    #[display("{}", _0)]
    InvalidRequest(#[error(not(source))] String),

    /// Bad credential, or a move attempted out of turn.
    #[display("{}", _0)]
    Unauthorized(#[error(not(source))] String),

    /// Request clashes with current state: duplicate join, claimed cell,
    /// or a move after the game ended.
    #[display("{}", _0)]
    Conflict(#[error(not(source))] String),

    /// Two players are already seated.
    #[display("Lobby is full")]
    RoomFull,
}

impl From<PositionError> for TableError {
    fn from(err: PositionError) -> Self {
        Self::InvalidRequest(format!("Error: {}", err))
    }
}

impl From<MoveError> for TableError {
    fn from(err: MoveError) -> Self {
        Self::Conflict(err.to_string())
    }
}
