//! Turns replies into chat messages with inline keyboards.

use crate::action::{Action, ActionParseError};
use crate::dispatch::{DispatchError, GameView, Reply};
use noughts_engine::{Board, GameStatus, Mark, MoveOutcome};
use tracing::instrument;

/// A keyboard button: visible label plus the data sent back when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Text on the button.
    pub label: String,
    /// Action data returned on press.
    pub data: String,
}

impl Button {
    /// Creates a button that sends `action` when pressed.
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            data: action.to_string(),
        }
    }
}

/// A message ready for a chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Message text.
    pub text: String,
    /// Inline keyboard, row by row. Empty for plain messages.
    pub keyboard: Vec<Vec<Button>>,
}

impl OutboundMessage {
    /// A message without a keyboard.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }
}

/// Builds the text and keyboards for every reply.
#[derive(Debug, Clone, derive_new::new)]
pub struct Renderer {
    /// Name shown in the welcome text.
    #[new(into)]
    name: String,
}

impl Renderer {
    /// Renders a successful reply.
    #[instrument(skip(self, reply))]
    pub fn render(&self, reply: &Reply) -> OutboundMessage {
        match reply {
            Reply::Menu => self.menu(),
            Reply::Started(view) => turn(view),
            Reply::Moved { view, outcome } => match outcome {
                MoveOutcome::Won(mark) => won(*mark),
                MoveOutcome::Draw => drawn(),
                MoveOutcome::Continue => turn(view),
                // A refused press re-shows whatever state the game is in.
                MoveOutcome::Rejected(_) => match view.status() {
                    GameStatus::InProgress => turn(view),
                    GameStatus::Won(mark) => won(*mark),
                    GameStatus::Draw => drawn(),
                },
            },
            Reply::Ended => OutboundMessage::plain("Thanks for playing! Goodbye!"),
        }
    }

    /// Renders a dispatch failure.
    pub fn render_error(&self, error: &DispatchError) -> OutboundMessage {
        match error {
            DispatchError::NoActiveSession { .. } => {
                OutboundMessage::plain("Please start a new game with /start.")
            }
        }
    }

    /// Renders undecodable button data, quoting what was received.
    pub fn render_parse_error(&self, error: &ActionParseError) -> OutboundMessage {
        OutboundMessage::plain(format!(
            "Unknown action {:?}. Send /start to see the menu.",
            error.data
        ))
    }

    fn menu(&self) -> OutboundMessage {
        OutboundMessage {
            text: format!("Welcome to {}, a game of tic-tac-toe! Choose an action:", self.name),
            keyboard: vec![vec![
                Button::new("New game", Action::NewGame),
                Button::new("Exit", Action::EndSession),
            ]],
        }
    }
}

/// Board keyboard with a prompt for the mark to move.
fn turn(view: &GameView) -> OutboundMessage {
    OutboundMessage {
        text: format!("Player {} to move:", view.current_player()),
        keyboard: board_keyboard(view.board()),
    }
}

fn won(mark: Mark) -> OutboundMessage {
    finished(format!("Player {mark} wins!\nDo you want to play again?"))
}

fn drawn() -> OutboundMessage {
    finished("Draw!\nDo you want to play again?".to_string())
}

/// Result text with restart and exit buttons.
fn finished(text: String) -> OutboundMessage {
    OutboundMessage {
        text,
        keyboard: vec![vec![
            Button::new("Yes", Action::NewGame),
            Button::new("No", Action::EndSession),
        ]],
    }
}

/// One button per square; empty squares show a blank label.
fn board_keyboard(board: &Board) -> Vec<Vec<Button>> {
    board
        .rows()
        .enumerate()
        .map(|(row, squares)| {
            squares
                .iter()
                .enumerate()
                .map(|(col, square)| Button::new(square.to_string(), Action::Move { row, col }))
                .collect()
        })
        .collect()
}
