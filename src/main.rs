//! Minigames - Unified CLI
//!
//! Hosts the tic-tac-toe table or talks to one as a player.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, GameKind};
use minigames::{GameTable, ServerConfig, TableClient};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Server {
            game,
            host,
            port,
            config,
        } => run_server(game, host, port, config).await,
        Command::Join { server_url, name } => {
            let ticket = TableClient::new(server_url).join(&name).await?;
            println!("Joined as {} (role {})", ticket.name(), ticket.role());
            println!("Token: {}", ticket.token());
            Ok(())
        }
        Command::Move {
            server_url,
            player,
            token,
            position,
        } => {
            let body = TableClient::new(server_url)
                .make_move(&player, &token, &position)
                .await?;
            print!("{body}");
            Ok(())
        }
        Command::Reset { server_url } => {
            println!("{}", TableClient::new(server_url).reset().await?);
            Ok(())
        }
        Command::Board { server_url } => {
            print!("{}", TableClient::new(server_url).board().await?);
            Ok(())
        }
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(
    game: GameKind,
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match game {
        GameKind::TicTacToe => {}
        GameKind::Sequence => bail!("Sequence server is not yet implemented"),
        GameKind::Battleship => bail!("Battleship server is not yet implemented"),
    }

    let config = match config_path {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    }
    .with_env()?
    .with_cli(host, port);

    let addr = config.bind_addr();
    info!(%addr, "Starting tic-tac-toe server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Error starting Tic Tac Toe server on {addr}"))?;

    minigames::serve(listener, GameTable::new()).await?;
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,minigames=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
