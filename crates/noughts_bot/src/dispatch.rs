//! Routes chat actions to the session store and game engine.

use crate::action::Action;
use crate::store::{SessionId, SessionStore};
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_engine::{Board, Game, GameStatus, Mark, MoveOutcome};
use tracing::{debug, info, instrument, warn};

/// Owned snapshot of a game, taken under the session lock.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameView {
    /// Board contents.
    board: Board,
    /// Mark to move, or the last mover once the game is over.
    current_player: Mark,
    /// In progress, won or drawn.
    status: GameStatus,
    /// Accepted moves so far.
    moves: usize,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            board: game.board().clone(),
            current_player: game.current_player(),
            status: game.status(),
            moves: game.history().len(),
        }
    }
}

/// What the chat should show after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Welcome menu.
    Menu,
    /// A fresh game was started.
    Started(GameView),
    /// A move was attempted on an active game.
    Moved {
        /// The game after the attempt (unchanged when rejected).
        view: GameView,
        /// What the move did.
        outcome: MoveOutcome,
    },
    /// The session was closed.
    Ended,
}

/// Action that cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DispatchError {
    /// The chat has no active game.
    #[display("No active game for chat {session_id}")]
    NoActiveSession {
        /// Chat the action came from.
        session_id: SessionId,
    },
}

/// Turns actions into store and engine calls.
///
/// The store is injected so several dispatchers (or tests) can share one.
#[derive(Debug, Clone, Default, derive_new::new)]
pub struct Dispatcher {
    store: SessionStore,
}

impl Dispatcher {
    /// Returns the underlying store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Handles one action for one chat.
    ///
    /// A rejected move is still `Ok`; only a missing game is an error.
    #[instrument(skip(self, id, action), fields(session_id = %id, action = %action))]
    pub fn dispatch(&self, id: SessionId, action: Action) -> Result<Reply, DispatchError> {
        match action {
            Action::Welcome => Ok(Reply::Menu),
            Action::NewGame => {
                let game = self.store.start(id);
                Ok(Reply::Started(GameView::from(&game)))
            }
            Action::Move { row, col } => self.apply_move(id, row, col),
            Action::EndSession => {
                self.store.end(id);
                Ok(Reply::Ended)
            }
        }
    }

    /// Looks up the game, applies the move and snapshots it in one critical
    /// section.
    fn apply_move(&self, id: SessionId, row: usize, col: usize) -> Result<Reply, DispatchError> {
        let (view, outcome) = self
            .store
            .with_game(id, |game| {
                let outcome = game.apply_move(row, col);
                (GameView::from(&*game), outcome)
            })
            .ok_or_else(|| {
                warn!(row, col, "Move for a chat with no active game");
                DispatchError::NoActiveSession { session_id: id }
            })?;

        if outcome.is_terminal() {
            info!(%outcome, moves = view.moves, "Game finished");
        } else {
            debug!(%outcome, "Move handled");
        }

        Ok(Reply::Moved { view, outcome })
    }
}
