//! Board positions addressed by flat row-major index.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A cell on the tic-tac-toe board (index 0-8, row-major).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

/// Error parsing a cell index from request text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PositionError {
    /// Text is not an integer.
    #[display("{:?} is not an integer", _0)]
    NotAnInteger(String),

    /// Integer outside 0-8.
    #[display("{} is not a valid position (expected 0-8)", _0)]
    OutOfRange(i64),
}

impl std::error::Error for PositionError {}

impl Position {
    /// All nine positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Converts to the flat board index.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a flat board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates a position from row and column (both 0-2).
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Row of this cell (index / 3).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column of this cell (index % 3).
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// Where the cell sits on the grid, as shown in rejection messages.
    pub fn label(self) -> &'static str {
        const NAMES: [&str; 9] = [
            "top left",
            "top middle",
            "top right",
            "middle left",
            "center",
            "middle right",
            "bottom left",
            "bottom middle",
            "bottom right",
        ];
        NAMES[self.to_index()]
    }

    /// Parses a cell index as sent by a client.
    #[instrument]
    pub fn parse(raw: &str) -> Result<Self, PositionError> {
        let value: i64 = raw
            .parse()
            .map_err(|_| PositionError::NotAnInteger(raw.to_string()))?;
        usize::try_from(value)
            .ok()
            .and_then(Self::from_index)
            .ok_or(PositionError::OutOfRange(value))
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_index())
    }
}
