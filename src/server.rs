//! HTTP routes for the tic-tac-toe table.
//!
//! Plain-text request/response over GET:
//!
//! - `/join/{player}` (or `/join/?player=`) seats a player and returns a token
//! - `/move/{position}` (or `/move/?position=`) with `Player` and
//!   `Authorization` headers claims a cell
//! - `/reset/` clears the board, keeping players
//! - `/board/` shows the board, turn, phase and players

use crate::error::TableError;
use crate::table::{GameTable, Joined, MoveOutcome, TableSnapshot};
use axum::Router;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use minigames_tictactoe::GameStatus;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{info, instrument, warn};

/// Header naming the acting player on move requests.
pub const PLAYER_HEADER: &str = "Player";

/// Fixed port the server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8090;

impl TableError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            TableError::InvalidRequest(_) | TableError::RoomFull => StatusCode::BAD_REQUEST,
            TableError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            TableError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for TableError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "Request rejected");
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct JoinQuery {
    player: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoveQuery {
    position: Option<String>,
}

/// Builds the router over a shared table.
#[instrument(skip(table))]
pub fn router(table: GameTable) -> Router {
    Router::new()
        .route("/join/", get(join_by_query))
        .route("/join/{player}", get(join))
        .route("/move/", get(make_move_by_query))
        .route("/move/{position}", get(make_move))
        .route("/reset", get(reset))
        .route("/reset/", get(reset))
        .route("/board", get(board))
        .route("/board/", get(board))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(table)
}

/// Serves the router on an already-bound listener until the process exits.
#[instrument(skip(listener, table))]
pub async fn serve(listener: TcpListener, table: GameTable) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Tic-tac-toe server ready");
    axum::serve(listener, router(table)).await
}

fn log_request(req: Request) -> Request {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

async fn join(
    State(table): State<GameTable>,
    Path(player): Path<String>,
) -> Result<String, TableError> {
    join_player(&table, &player)
}

async fn join_by_query(
    State(table): State<GameTable>,
    Query(query): Query<JoinQuery>,
) -> Result<String, TableError> {
    join_player(&table, query.player.as_deref().unwrap_or_default())
}

fn join_player(table: &GameTable, name: &str) -> Result<String, TableError> {
    let joined = table.join(name)?;
    Ok(join_message(&joined))
}

async fn make_move(
    State(table): State<GameTable>,
    Path(position): Path<String>,
    headers: HeaderMap,
) -> Result<String, TableError> {
    move_player(&table, &headers, &position)
}

async fn make_move_by_query(
    State(table): State<GameTable>,
    Query(query): Query<MoveQuery>,
    headers: HeaderMap,
) -> Result<String, TableError> {
    move_player(&table, &headers, query.position.as_deref().unwrap_or_default())
}

fn move_player(
    table: &GameTable,
    headers: &HeaderMap,
    position: &str,
) -> Result<String, TableError> {
    let player = header_text(headers, PLAYER_HEADER);
    let credential = header_text(headers, header::AUTHORIZATION.as_str());
    let outcome = table.make_move(player, credential, position)?;
    Ok(move_message(&outcome))
}

async fn reset(State(table): State<GameTable>) -> String {
    table.reset();
    "Server received reset request. Resetting game.".to_string()
}

async fn board(State(table): State<GameTable>) -> String {
    describe(&table.snapshot())
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Body returned for a successful join.
pub fn join_message(joined: &Joined) -> String {
    format!(
        "Server received join request, welcome {}\nRole: {}\nToken: {}\n",
        joined.name(),
        joined.role(),
        joined.credential().expose()
    )
}

/// Body returned for an accepted move.
pub fn move_message(outcome: &MoveOutcome) -> String {
    let board = outcome.board().render();
    match outcome.status() {
        GameStatus::Won(_) => format!(
            "3 in a row! {} wins. Sending board state:\n\n{}",
            outcome.player(),
            board
        ),
        GameStatus::Draw => format!("Board is full, it's a draw. Sending board state:\n\n{board}"),
        GameStatus::InProgress => {
            format!("Server received move request. Sending board state:\n\n{board}")
        }
    }
}

/// Body returned for a board query.
pub fn describe(snapshot: &TableSnapshot) -> String {
    let players = if snapshot.seats().is_empty() {
        "(none)".to_string()
    } else {
        snapshot
            .seats()
            .iter()
            .map(|seat| format!("{} ({})", seat.name(), seat.role()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = format!(
        "Phase: {}\nTurn: {}\nPlayers: {}\n",
        snapshot.phase(),
        snapshot.to_move(),
        players
    );
    if let Some(winner) = snapshot.winner_name() {
        out.push_str(&format!("Winner: {winner}\n"));
    }
    out.push_str(&snapshot.board().render());
    out
}
