//! Pure tic-tac-toe game logic.
//!
//! A [`Game`] owns a 3x3 [`Board`], the mark to move and a terminal flag.
//! Moves go through [`Game::apply_move`], which returns an explicit
//! [`MoveOutcome`] so callers never confuse "rejected" with "no winner yet".
//!
//! ```
//! use noughts_engine::{Game, Mark, MoveOutcome};
//!
//! let mut game = Game::new();
//! assert_eq!(game.apply_move(1, 1), MoveOutcome::Continue);
//! assert_eq!(game.current_player(), Mark::O);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod position;
mod types;

pub mod invariants;
pub mod rules;

pub use game::{Game, GameStatus, MoveOutcome, Rejection};
pub use position::Position;
pub use types::{Board, Mark, Square};
