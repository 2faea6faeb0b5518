//! Chat transport abstraction.

use crate::render::OutboundMessage;
use crate::store::SessionId;
use async_trait::async_trait;

/// An inbound button press or command, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct Inbound {
    /// Chat the data came from.
    pub chat: SessionId,
    /// Raw button data or command text.
    #[new(into)]
    pub data: String,
}

/// Delivers messages to chats.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Name of the transport (for logging).
    fn name(&self) -> &str;

    /// Sends one message to one chat.
    async fn send(&self, chat: SessionId, message: &OutboundMessage) -> anyhow::Result<()>;
}
