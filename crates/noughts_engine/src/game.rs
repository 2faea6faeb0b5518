//! Game state machine for a single board.

use super::invariants::{GameInvariants, InvariantSet};
use super::position::Position;
use super::rules;
use super::types::{Board, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Current status of a game, derived from its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameStatus {
    /// Game is ongoing.
    #[display("in progress")]
    InProgress,
    /// Game ended in a win.
    #[display("won by {_0}")]
    Won(Mark),
    /// Game ended in a draw.
    #[display("draw")]
    Draw,
}

/// Why a move had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The target square already holds a mark.
    #[display("Square {_0} is already occupied")]
    Occupied(Position),
    /// The game already reached a win or draw.
    #[display("Game is already over")]
    GameOver,
    /// The coordinates do not address a square on the board.
    #[display("({row}, {col}) is outside the board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

/// Result of applying a move.
///
/// `Rejected` is distinct from `Continue`: a caller can always tell an
/// ignored move from a move that simply did not end the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum MoveOutcome {
    /// Move accepted, the other mark is now to move.
    #[display("continue")]
    Continue,
    /// Move had no effect; the game is unchanged.
    #[display("rejected: {_0}")]
    Rejected(Rejection),
    /// Move accepted and completed a line for this mark.
    #[display("won by {_0}")]
    Won(Mark),
    /// Move accepted and filled the board without a winner.
    #[display("draw")]
    Draw,
}

impl MoveOutcome {
    /// Returns true if the move changed the board.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// Returns true if this move ended the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::Won(_) | MoveOutcome::Draw)
    }
}

/// Tic-tac-toe game engine.
///
/// The only mutation is [`Game::apply_move`] (or [`Game::place`]). Once a win
/// or draw is reached `is_over` stays set and every further move is rejected;
/// starting over means constructing a new `Game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) current_player: Mark,
    pub(crate) is_over: bool,
    pub(crate) history: Vec<Position>,
}

impl Game {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            is_over: false,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move, or the mark that made the final move once
    /// the game is over.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns true once a win or draw has been reached.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Returns accepted moves in play order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        if !self.is_over {
            return GameStatus::InProgress;
        }
        match rules::check_winner(&self.board) {
            Some(mark) => GameStatus::Won(mark),
            None => GameStatus::Draw,
        }
    }

    /// Returns the empty squares, or nothing once the game is over.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_over {
            return Vec::new();
        }
        Position::valid_moves(&self.board)
    }

    /// Applies a move for the current player at `(row, col)`.
    ///
    /// Coordinates outside `0..3` are rejected without touching the game.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        match Position::from_coords(row, col) {
            Some(pos) => self.place(pos),
            None => {
                warn!(row, col, "Move coordinates outside the board");
                MoveOutcome::Rejected(Rejection::OutOfRange { row, col })
            }
        }
    }

    /// Places the current player's mark at `pos`.
    ///
    /// Win is checked before draw; on either the turn is not advanced.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn place(&mut self, pos: Position) -> MoveOutcome {
        if self.is_over {
            debug!("Move after game over ignored");
            return MoveOutcome::Rejected(Rejection::GameOver);
        }
        if !self.board.is_empty(pos) {
            debug!("Move on occupied square ignored");
            return MoveOutcome::Rejected(Rejection::Occupied(pos));
        }

        let player = self.current_player;
        self.board.set(pos, Square::Occupied(player));
        self.history.push(pos);

        let outcome = if rules::check_winner(&self.board).is_some() {
            self.is_over = true;
            MoveOutcome::Won(player)
        } else if rules::is_full(&self.board) {
            self.is_over = true;
            MoveOutcome::Draw
        } else {
            self.current_player = player.opponent();
            MoveOutcome::Continue
        };

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "game invariants violated after {pos}"
        );
        debug!(%outcome, moves = self.history.len(), "Move applied");
        outcome
    }

    /// Formats the board as plain text.
    pub fn render_text(&self) -> String {
        self.board.render_text()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
