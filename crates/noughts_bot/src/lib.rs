//! Chat-driven tic-tac-toe sessions.
//!
//! # Architecture
//!
//! - **Store**: one [`Game`](noughts_engine::Game) per chat id, created on
//!   start or restart and dropped on exit
//! - **Dispatcher**: maps [`Action`]s onto the store and engine and returns a
//!   [`Reply`]
//! - **Renderer**: turns replies into text plus inline keyboards
//! - **Transport**: delivers messages; [`ConsoleTransport`] drives chats
//!   from a terminal or script
//!
//! # Example
//!
//! ```
//! use noughts_bot::{Action, Dispatcher, Reply, SessionId, SessionStore};
//!
//! let dispatcher = Dispatcher::new(SessionStore::new());
//! let chat = SessionId::new(7);
//! dispatcher.dispatch(chat, Action::NewGame).unwrap();
//! let reply = dispatcher.dispatch(chat, Action::Move { row: 1, col: 1 }).unwrap();
//! assert!(matches!(reply, Reply::Moved { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod bot;
mod config;
mod dispatch;
mod render;
mod store;
mod transport;

pub mod console;

// Crate-level exports - Actions
pub use action::{Action, ActionParseError};

// Crate-level exports - Bot loop
pub use bot::Bot;

// Crate-level exports - Configuration
pub use config::{BotConfig, CONFIG_ENV, ConfigError};

// Crate-level exports - Dispatch
pub use dispatch::{DispatchError, Dispatcher, GameView, Reply};

// Crate-level exports - Rendering
pub use render::{Button, OutboundMessage, Renderer};

// Crate-level exports - Session management
pub use store::{SessionId, SessionStore};

// Crate-level exports - Transports
pub use console::ConsoleTransport;
pub use transport::{ChatTransport, Inbound};
