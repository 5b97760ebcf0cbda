//! Scoreboard Server
//!
//! Loads the score snapshot from disk, then serves the leaderboard API until
//! shutdown. A corrupt snapshot aborts startup rather than being discarded.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scoreboard::{http, ScoreBoard, ScoreStore, ServerConfig, VERSION};

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to bind to
    #[clap(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[clap(short, long, default_value = "8080")]
    port: u16,

    /// Path of the JSON score file
    #[clap(short, long, default_value = "scores.json")]
    storage: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Scoreboard Server v{}", VERSION);

    let board = ScoreBoard::open(ScoreStore::new(&args.storage))
        .with_context(|| format!("failed to load score file {}", args.storage.display()))?;
    info!(
        "{} scores loaded from {}",
        board.len().await,
        args.storage.display()
    );

    let bind_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;

    http::server::run(ServerConfig { bind_addr }, Arc::new(board)).await?;

    Ok(())
}
