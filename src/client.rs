//! HTTP client for playing at a remote table.

use crate::server::PLAYER_HEADER;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use derive_new::new;
use minigames_tictactoe::Role;
use reqwest::Url;
use tracing::{debug, info, instrument, warn};

/// Failure talking to the table server.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// The request never got a response.
    #[display("transport error: {}", _0)]
    #[from]
    Transport(#[error(source)] reqwest::Error),

    /// The server answered with a non-success status.
    #[display("server rejected request ({}): {}", status, message)]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Body returned by the server.
        message: String,
    },

    /// The server URL cannot be used as a base.
    #[display("invalid server url: {}", _0)]
    InvalidUrl(#[error(not(source))] String),

    /// A join response did not carry role and token lines.
    #[display("malformed join response: {}", _0)]
    MalformedResponse(#[error(not(source))] String),
}

/// What the server hands back on join.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct JoinTicket {
    /// Name the player joined under.
    name: String,
    /// Assigned role.
    role: Role,
    /// Token to send as `Authorization` on moves.
    token: String,
}

impl JoinTicket {
    /// Parses the `Role:` and `Token:` lines of a join response body.
    pub fn parse(name: &str, body: &str) -> Result<Self, ClientError> {
        let field = |prefix: &str| {
            body.lines()
                .find_map(|line| line.strip_prefix(prefix))
                .map(str::trim)
        };
        let role = match field("Role:") {
            Some("A") => Role::A,
            Some("B") => Role::B,
            _ => return Err(ClientError::MalformedResponse(body.to_string())),
        };
        let token = field("Token:")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::MalformedResponse(body.to_string()))?;
        Ok(Self::new(name.to_string(), role, token.to_string()))
    }
}

/// Client for one table server.
#[derive(Debug, Clone)]
pub struct TableClient {
    base_url: String,
    client: reqwest::Client,
}

impl TableClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:8090`).
    #[instrument(skip_all)]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, "Creating table client");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Joins the table under `name`.
    #[instrument(skip(self))]
    pub async fn join(&self, name: &str) -> Result<JoinTicket, ClientError> {
        let url = self.endpoint(&["join", name])?;
        let body = self.send(self.client.get(url)).await?;
        let ticket = JoinTicket::parse(name, &body)?;
        info!(name, role = %ticket.role, "Joined table");
        Ok(ticket)
    }

    /// Claims `position` for `player`, returning the server's board text.
    #[instrument(skip(self, token))]
    pub async fn make_move(
        &self,
        player: &str,
        token: &str,
        position: &str,
    ) -> Result<String, ClientError> {
        let url = self.endpoint(&["move", position])?;
        let request = self
            .client
            .get(url)
            .header(PLAYER_HEADER, player)
            .header(reqwest::header::AUTHORIZATION, token);
        self.send(request).await
    }

    /// Resets the board, keeping players.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<String, ClientError> {
        let url = self.endpoint(&["reset", ""])?;
        self.send(self.client.get(url)).await
    }

    /// Fetches the board view.
    #[instrument(skip(self))]
    pub async fn board(&self) -> Result<String, ClientError> {
        let url = self.endpoint(&["board", ""])?;
        self.send(self.client.get(url)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "Server responded");

        if !status.is_success() {
            warn!(%status, body = %body, "Request rejected by server");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }
}
