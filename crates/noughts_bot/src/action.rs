//! Inbound user actions and their button-data encoding.
//!
//! Chat buttons carry a short data string. Every keyboard this crate renders
//! is built from [`Action`]'s `Display`, and every press is decoded through
//! its `FromStr`, so the two sides agree on the literals by construction.

use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::instrument;

const WELCOME: &str = "/start";
const NEW_GAME: &str = "start_game";
const RESTART: &str = "restart";
const END_SESSION: &str = "exit_game";

/// An action a user can take in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Action {
    /// Show the welcome menu.
    #[display("/start")]
    Welcome,
    /// Start a new game, replacing any current one.
    #[display("start_game")]
    NewGame,
    /// Place the current mark at a cell.
    #[display("{row},{col}")]
    Move {
        /// Row, 0 at the top.
        row: usize,
        /// Column, 0 at the left.
        col: usize,
    },
    /// Leave the game and drop the session.
    #[display("exit_game")]
    EndSession,
}

/// Button data that does not name any action.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown action: {data:?}")]
pub struct ActionParseError {
    /// The data as received.
    pub data: String,
}

impl FromStr for Action {
    type Err = ActionParseError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s.trim();
        match data {
            WELCOME => return Ok(Action::Welcome),
            NEW_GAME | RESTART => return Ok(Action::NewGame),
            END_SESSION => return Ok(Action::EndSession),
            _ => {}
        }

        // Range checking belongs to the engine; only the shape is checked here.
        data.split_once(',')
            .and_then(|(row, col)| {
                Some(Action::Move {
                    row: row.trim().parse().ok()?,
                    col: col.trim().parse().ok()?,
                })
            })
            .ok_or_else(|| ActionParseError {
                data: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!("0,2".parse(), Ok(Action::Move { row: 0, col: 2 }));
        assert_eq!(" 1, 1 ".parse(), Ok(Action::Move { row: 1, col: 1 }));
    }

    #[test]
    fn test_out_of_range_move_still_decodes() {
        assert_eq!("7,7".parse(), Ok(Action::Move { row: 7, col: 7 }));
    }

    #[test]
    fn test_parse_structural_actions() {
        assert_eq!("/start".parse(), Ok(Action::Welcome));
        assert_eq!("start_game".parse(), Ok(Action::NewGame));
        assert_eq!("restart".parse(), Ok(Action::NewGame));
        assert_eq!("exit_game".parse(), Ok(Action::EndSession));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for data in ["", "exit", "1", "1,", "a,b", "-1,0", "1,2,3"] {
            let err = data.parse::<Action>().unwrap_err();
            assert_eq!(err.data, data);
        }
    }

    #[test]
    fn test_display_decodes_to_same_action() {
        for action in [
            Action::Welcome,
            Action::NewGame,
            Action::EndSession,
            Action::Move { row: 2, col: 0 },
        ] {
            assert_eq!(action.to_string().parse(), Ok(action));
        }
    }
}
