//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Noughts - tic-tac-toe sessions over a chat interface
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Chat-driven tic-tac-toe session manager", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (falls back to $NOUGHTS_CONFIG, then defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat over stdin/stdout, one `<chat_id> <action>` per line
    Console,

    /// Replay a transcript file of `<chat_id> <action>` lines
    Script {
        /// Transcript to replay
        path: PathBuf,
    },
}
