//! Core domain types for tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// First mover.
    A,
    /// Second mover.
    B,
}

impl Role {
    /// Returns the other role.
    pub fn opponent(self) -> Self {
        match self {
            Role::A => Role::B,
            Role::B => Role::A,
        }
    }

    /// Symbol written into a claimed cell.
    pub fn symbol(self) -> &'static str {
        match self {
            Role::A => "A",
            Role::B => "B",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Unclaimed cell.
    #[default]
    Empty,
    /// Cell claimed by a role.
    Claimed(Role),
}

/// 3x3 board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if the cell at `pos` is unclaimed.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Text shown for a cell: the claiming role's symbol, or the cell's own
    /// index while it is still empty.
    pub fn label(&self, pos: Position) -> String {
        match self.get(pos) {
            Cell::Empty => pos.to_index().to_string(),
            Cell::Claimed(role) => role.symbol().to_string(),
        }
    }

    /// Renders the board as a `TIC | TAC | TOE` table.
    pub fn render(&self) -> String {
        crate::render::render_board(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still accepted.
    InProgress,
    /// A role completed a line.
    Won(Role),
    /// Board is full with no line.
    Draw,
}

impl GameStatus {
    /// Returns the winning role, if any.
    pub fn winner(self) -> Option<Role> {
        match self {
            GameStatus::Won(role) => Some(role),
            _ => None,
        }
    }

    /// True once the game no longer accepts moves.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}
