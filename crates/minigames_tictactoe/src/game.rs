//! Game logic and rules for tic-tac-toe.

use crate::rules::{check_winner, is_draw};
use crate::{Board, Cell, GameStatus, Position, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Error applying a move to the board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell already carries a mark.
    #[display("cell {} ({}) is already claimed", _0, _0.label())]
    CellOccupied(Position),

    /// The game is already won or drawn.
    #[display("game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game engine.
///
/// Holds the board, the role to move and the evaluated status. The only
/// way to change the board is [`Game::place`], which keeps turns alternating
/// and re-evaluates the status after every mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Role,
    status: GameStatus,
    history: Vec<Position>,
}

impl Game {
    /// Creates a new game with an empty board and role A to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Role::A,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the role allowed to move next.
    pub fn to_move(&self) -> Role {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winning role, if any.
    pub fn winner(&self) -> Option<Role> {
        self.status.winner()
    }

    /// Positions played so far, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Places the current role's mark at `pos`.
    ///
    /// On success the turn passes to the opponent and the new status is
    /// returned. On error nothing changes.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn place(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }

        let role = self.to_move;
        self.board.set(pos, Cell::Claimed(role));
        self.history.push(pos);
        self.to_move = role.opponent();
        self.update_status();

        debug!(%pos, %role, status = ?self.status, "Mark placed");
        Ok(self.status)
    }

    /// Clears the board and hands the first move back to role A.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn update_status(&mut self) {
        if let Some(winner) = check_winner(&self.board) {
            self.status = GameStatus::Won(winner);
        } else if is_draw(&self.board) {
            self.status = GameStatus::Draw;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
