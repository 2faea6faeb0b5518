//! Noughts - chat-driven tic-tac-toe.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use noughts_bot::{Bot, BotConfig, ConsoleTransport, Dispatcher, Renderer, SessionStore, console};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = BotConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    match cli.command {
        Command::Console => run(tokio::io::stdin(), &config).await,
        Command::Script { path } => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open transcript {}", path.display()))?;
            run(file, &config).await
        }
    }
}

/// Runs the bot until the input is exhausted.
async fn run<R>(input: R, config: &BotConfig) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    info!(name = %config.name(), "Starting noughts");

    let bot = Bot::new(
        Dispatcher::new(SessionStore::new()),
        Renderer::new(config.name().clone()),
        ConsoleTransport::new(tokio::io::stdout()),
    );
    let (tx, rx) = mpsc::channel(*config.channel_capacity());

    let (queued, handled) = tokio::join!(console::listen(input, tx), bot.serve(rx));
    let queued = queued?;

    info!(queued, handled, "Input exhausted; shutting down");
    Ok(())
}
