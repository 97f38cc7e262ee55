//! `labyrinth-server`: serves a maze file to players over TCP.
//!
//! ```text
//! labyrinth-server <v4|v6> <port> -i <maze-file> [--codec fixed|json]
//! ```
//!
//! Exits non-zero when the arguments, the maze file, or the socket setup
//! are bad, and zero after Ctrl-C.

mod cli;

use std::error::Error;

use clap::Parser;
use labyrinth::prelude::*;
use tracing_subscriber::EnvFilter;

use cli::{Cli, CodecKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let grid = Grid::load(&cli.maze, cli.side)?;
    let builder = LabyrinthServerBuilder::new()
        .bind(cli.bind_addr())
        .session_config(cli.session_config());

    match cli.codec {
        CodecKind::Fixed => {
            let codec = FixedCodec::new(cli.frame_layout());
            serve(builder.build(grid, codec).await?).await?;
        }
        CodecKind::Json => {
            serve(builder.build(grid, JsonCodec).await?).await?;
        }
    }

    tracing::info!("server stopped");
    Ok(())
}

async fn serve<C: Codec>(server: LabyrinthServer<C>) -> Result<(), LabyrinthError> {
    server.run_until(shutdown_signal()).await
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
