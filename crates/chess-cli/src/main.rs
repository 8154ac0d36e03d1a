//! Chess CLI - play the rules engine from a terminal.
//!
//! Reads commands from stdin and writes the board and replies to stdout.
//! Logs go to stderr, filtered by `RUST_LOG`.

mod config;
mod render;
mod session;

use anyhow::Context;
use chess_core::{Color, PromotionKind};
use chess_rules::{Board, Game};
use clap::Parser;
use config::CliConfig;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Chess CLI - a line-oriented chess board.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Play chess moves on a terminal board")]
struct Args {
    /// Path to a TOML config file (defaults to ./chess-cli.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Promote automatically to this piece (queen, rook, bishop, knight)
    #[arg(long)]
    auto_promote: Option<PromotionKind>,

    /// Starting placement, top rank first, e.g. "4k3/P7/8/8/8/8/8/4K3"
    #[arg(long)]
    placement: Option<String>,

    /// Side to move in a custom placement
    #[arg(long, default_value = "white")]
    turn: Color,

    /// Draw the board without rank and file labels
    #[arg(long)]
    no_coordinates: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = CliConfig::load(args.config.as_deref())?;
    if args.auto_promote.is_some() {
        config.auto_promote = args.auto_promote;
    }
    if args.placement.is_some() {
        config.start_placement = args.placement;
    }
    if args.no_coordinates {
        config.show_coordinates = false;
    }
    tracing::debug!(?config, "starting session");

    let game = match &config.start_placement {
        Some(text) => {
            let board = Board::from_placement(text, args.turn)
                .with_context(|| format!("invalid placement '{}'", text))?;
            Game::from_board(board)
        }
        None => Game::new(),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(game, config, stdin.lock(), stdout.lock());
    session.run().context("terminal session failed")?;
    tracing::info!(turn = %session.game().current_turn(), "session ended");
    Ok(())
}
