//! The shared game table: one board, two seats, per-player credentials.

use crate::credential::Credential;
use crate::error::TableError;
use derive_getters::Getters;
use minigames_tictactoe::{Board, Game, GameStatus, Position, Role};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Result of a successful join.
#[derive(Debug, Clone, Getters)]
pub struct Joined {
    /// Display name of the new player.
    name: String,
    /// Seat assigned to the player.
    role: Role,
    /// Secret the player must send with every move.
    credential: Credential,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Getters)]
pub struct MoveOutcome {
    /// Name of the player who moved.
    player: String,
    /// Role of the player who moved.
    role: Role,
    /// Cell that was claimed.
    position: Position,
    /// Status after the move.
    status: GameStatus,
    /// Board after the move.
    board: Board,
}

impl MoveOutcome {
    /// True if this move completed a line.
    pub fn is_win(&self) -> bool {
        self.status == GameStatus::Won(self.role)
    }
}

/// Where the table is in its lifecycle. Derived from players and status,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    /// Nobody has joined.
    #[display("lobby")]
    Lobby,
    /// One player is waiting for an opponent.
    #[display("awaiting second player")]
    AwaitingSecondPlayer,
    /// Both seats taken, game in progress.
    #[display("in play")]
    InPlay,
    /// A role completed a line.
    #[display("won by {}", _0)]
    Won(Role),
    /// Full board, no line.
    #[display("drawn")]
    Drawn,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Seat {
    /// Display name.
    name: String,
    /// Assigned role.
    role: Role,
}

/// Read-only view of the table at one instant.
#[derive(Debug, Clone, Getters)]
pub struct TableSnapshot {
    /// Current board.
    board: Board,
    /// Role allowed to move next.
    to_move: Role,
    /// Game status.
    status: GameStatus,
    /// Lifecycle phase.
    phase: Phase,
    /// Seated players ordered by role.
    seats: Vec<Seat>,
}

impl TableSnapshot {
    /// Name of the player holding `role`, if seated.
    pub fn player_for(&self, role: Role) -> Option<&str> {
        self.seats
            .iter()
            .find(|seat| seat.role == role)
            .map(|seat| seat.name.as_str())
    }

    /// Name of the winning player, if the game is won and the seat is taken.
    pub fn winner_name(&self) -> Option<&str> {
        self.status.winner().and_then(|role| self.player_for(role))
    }
}

/// Game state for the single table: the game plus who is seated.
///
/// All methods validate fully before mutating, so a rejected request
/// never leaves a partial update behind.
#[derive(Debug, Default)]
pub struct TableState {
    game: Game,
    players: HashMap<String, Role>,
    credentials: HashMap<String, Credential>,
}

impl TableState {
    /// Creates an empty table: empty board, nobody seated.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating new game table");
        Self::default()
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the role assigned to `name`, if seated.
    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.players.get(name).copied()
    }

    /// Number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Derives the lifecycle phase.
    pub fn phase(&self) -> Phase {
        match self.game.status() {
            GameStatus::Won(role) => Phase::Won(role),
            GameStatus::Draw => Phase::Drawn,
            GameStatus::InProgress => match self.players.len() {
                0 => Phase::Lobby,
                1 => Phase::AwaitingSecondPlayer,
                _ => Phase::InPlay,
            },
        }
    }

    /// Seats a player. The first to join plays A, the second plays B.
    #[instrument(skip(self))]
    pub fn join(&mut self, name: &str) -> Result<Joined, TableError> {
        if name.trim().is_empty() {
            warn!("Join rejected: empty name");
            return Err(TableError::InvalidRequest(
                "Player name is required".to_string(),
            ));
        }
        if self.players.contains_key(name) {
            warn!(name, "Join rejected: name already seated");
            return Err(TableError::Conflict("Player already joined".to_string()));
        }
        let role = match self.players.len() {
            0 => Role::A,
            1 => Role::B,
            count => {
                warn!(name, count, "Join rejected: table already has 2 players");
                return Err(TableError::RoomFull);
            }
        };

        let credential = Credential::issue();
        self.players.insert(name.to_string(), role);
        self.credentials.insert(name.to_string(), credential.clone());

        info!(name, %role, "Player seated");
        Ok(Joined {
            name: name.to_string(),
            role,
            credential,
        })
    }

    /// Applies a move for `player` at the cell named by `position`.
    ///
    /// Checks, in order: credential, game not over, turn, cell index,
    /// cell unclaimed.
    #[instrument(skip(self, credential))]
    pub fn make_move(
        &mut self,
        player: &str,
        credential: &str,
        position: &str,
    ) -> Result<MoveOutcome, TableError> {
        let authorized = self
            .credentials
            .get(player)
            .is_some_and(|stored| stored.matches(credential));
        let role = match self.role_of(player) {
            Some(role) if authorized => role,
            _ => {
                warn!(player, "Move rejected: credential mismatch");
                return Err(TableError::Unauthorized("Unauthorized".to_string()));
            }
        };

        if self.game.status().is_over() {
            warn!(player, status = ?self.game.status(), "Move rejected: game over");
            return Err(minigames_tictactoe::MoveError::GameOver.into());
        }

        let to_move = self.game.to_move();
        if role != to_move {
            warn!(player, %role, %to_move, "Move rejected: out of turn");
            return Err(TableError::Unauthorized("It is not your turn".to_string()));
        }

        let pos = Position::parse(position).map_err(|e| {
            warn!(player, position, error = %e, "Move rejected: bad position");
            TableError::from(e)
        })?;

        let status = self.game.place(pos).map_err(|e| {
            warn!(player, %pos, error = %e, "Move rejected by game");
            TableError::from(e)
        })?;

        info!(player, %role, %pos, ?status, "Move applied");
        Ok(MoveOutcome {
            player: player.to_string(),
            role,
            position: pos,
            status,
            board: self.game.board().clone(),
        })
    }

    /// Clears the board and gives the first move back to A. Seats and
    /// credentials are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.game.reset();
        info!(players = self.players.len(), "Game reset");
    }

    /// Captures a read-only view.
    pub fn snapshot(&self) -> TableSnapshot {
        let mut seats: Vec<Seat> = self
            .players
            .iter()
            .map(|(name, &role)| Seat {
                name: name.clone(),
                role,
            })
            .collect();
        seats.sort_by_key(|seat| seat.role);

        TableSnapshot {
            board: self.game.board().clone(),
            to_move: self.game.to_move(),
            status: self.game.status(),
            phase: self.phase(),
            seats,
        }
    }
}

/// Shared handle to the process-wide table.
///
/// Cloning is cheap; every clone sees the same state. Each operation runs
/// its whole read-modify-write under one lock.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    state: Arc<Mutex<TableState>>,
}

impl GameTable {
    /// Creates a table with an empty board and no players.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TableState::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Table lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Seats a player; see [`TableState::join`].
    #[instrument(skip(self))]
    pub fn join(&self, name: &str) -> Result<Joined, TableError> {
        self.lock().join(name)
    }

    /// Applies a move; see [`TableState::make_move`].
    #[instrument(skip(self, credential))]
    pub fn make_move(
        &self,
        player: &str,
        credential: &str,
        position: &str,
    ) -> Result<MoveOutcome, TableError> {
        self.lock().make_move(player, credential, position)
    }

    /// Resets the board; see [`TableState::reset`].
    #[instrument(skip(self))]
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Captures a read-only view of the table.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> TableSnapshot {
        let snapshot = self.lock().snapshot();
        debug!(phase = %snapshot.phase, "Snapshot taken");
        snapshot
    }
}
