//! Bot loop: decode, dispatch, render, send.

use crate::action::Action;
use crate::dispatch::Dispatcher;
use crate::render::{OutboundMessage, Renderer};
use crate::transport::{ChatTransport, Inbound};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// Connects a dispatcher to a chat transport.
#[derive(Debug, derive_new::new)]
pub struct Bot<T> {
    dispatcher: Dispatcher,
    renderer: Renderer,
    transport: T,
}

impl<T: ChatTransport> Bot<T> {
    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the bot, returning its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Decodes and dispatches one inbound action into a message for its chat.
    ///
    /// Never fails: unknown data and missing sessions become user-facing
    /// messages.
    #[instrument(skip(self, inbound), fields(session_id = %inbound.chat, data = %inbound.data))]
    pub fn respond(&self, inbound: &Inbound) -> OutboundMessage {
        let action = match inbound.data.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                warn!(error = %e, "Undecodable action");
                return self.renderer.render_parse_error(&e);
            }
        };

        match self.dispatcher.dispatch(inbound.chat, action) {
            Ok(reply) => self.renderer.render(&reply),
            Err(e) => {
                warn!(error = %e, "Action rejected");
                self.renderer.render_error(&e)
            }
        }
    }

    /// Handles one inbound action end to end.
    pub async fn handle(&self, inbound: Inbound) -> anyhow::Result<()> {
        let message = self.respond(&inbound);
        self.transport.send(inbound.chat, &message).await
    }

    /// Serves queued actions in arrival order until every sender is gone.
    ///
    /// A failed send is logged and does not stop the loop. Returns the number
    /// of actions handled.
    #[instrument(skip_all, fields(transport = self.transport.name()))]
    pub async fn serve(&self, mut rx: mpsc::Receiver<Inbound>) -> usize {
        let mut handled = 0;
        while let Some(inbound) = rx.recv().await {
            let chat = inbound.chat;
            if let Err(e) = self.handle(inbound).await {
                warn!(session_id = %chat, error = %e, "Failed to deliver message");
            }
            handled += 1;
        }
        info!(handled, "Inbound queue closed");
        handled
    }
}
