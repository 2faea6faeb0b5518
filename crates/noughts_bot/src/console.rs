//! Line-oriented console chat.
//!
//! Input lines look like `<chat_id> <data>`, for example `7 start_game` or
//! `7 1,1`, so several chats can be driven from one terminal or script.
//! Output lines are prefixed with `[<chat_id>]`; keyboard rows render as
//! `[label|data]` buttons.

use crate::render::OutboundMessage;
use crate::store::SessionId;
use crate::transport::{ChatTransport, Inbound};
use async_trait::async_trait;
use derive_more::{Display, Error};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, instrument, warn};

/// A console line that could not be read as `<chat_id> <data>`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed line {line:?}: {reason}")]
pub struct LineError {
    /// The offending line.
    pub line: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

/// Parses one console line.
///
/// Blank lines and `#` comments yield `Ok(None)`.
#[instrument]
pub fn parse_line(line: &str) -> Result<Option<Inbound>, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let error = |reason| LineError {
        line: line.to_string(),
        reason,
    };
    let (chat, data) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| error("expected a chat id followed by action data"))?;
    let chat: i64 = chat.parse().map_err(|_| error("chat id is not an integer"))?;

    Ok(Some(Inbound::new(SessionId::new(chat), data.trim())))
}

/// Reads console lines and queues them for the bot until EOF.
///
/// Malformed lines are logged and skipped. Returns the number of queued
/// actions; stops early if the receiving side hangs up.
#[instrument(skip_all)]
pub async fn listen<R>(reader: R, tx: mpsc::Sender<Inbound>) -> anyhow::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut queued = 0;

    info!("Console listening for actions");
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Some(inbound)) => {
                if tx.send(inbound).await.is_err() {
                    warn!("Bot stopped; no longer reading input");
                    break;
                }
                queued += 1;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Skipping console line"),
        }
    }

    debug!(queued, "Console input closed");
    Ok(queued)
}

/// Writes chat messages to any async writer.
#[derive(Debug)]
pub struct ConsoleTransport<W> {
    out: Mutex<W>,
}

impl<W> ConsoleTransport<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

/// Formats one message as console lines.
pub fn format_message(chat: SessionId, message: &OutboundMessage) -> String {
    let mut out = String::new();
    for line in message.text.lines() {
        out.push_str(&format!("[{chat}] {line}\n"));
    }
    for row in &message.keyboard {
        let buttons = row
            .iter()
            .map(|b| format!("[{}|{}]", b.label, b.data))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("[{chat}]   {buttons}\n"));
    }
    out
}

#[async_trait]
impl<W> ChatTransport for ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, chat: SessionId, message: &OutboundMessage) -> anyhow::Result<()> {
        let text = format_message(chat, message);
        let mut out = self.out.lock().await;
        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}
