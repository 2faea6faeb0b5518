//! Per-chat game session storage.

use noughts_engine::Game;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Opaque chat identifier, one session per chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct SessionId(i64);

impl SessionId {
    /// Wraps a raw chat id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

/// Recovers the guard from a poisoned lock.
///
/// Every critical section here leaves its data valid, so a panic elsewhere
/// never leaves a half-applied move behind.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Maps chat ids to live games.
///
/// Cloning yields another handle to the same map. The outer lock only guards
/// membership; each game has its own lock, so work on different chats never
/// waits on the other beyond the map lookup.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Arc<Mutex<Game>>>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Starts a fresh game for `id`, discarding any previous one.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn start(&self, id: SessionId) -> Game {
        let game = Game::new();
        let replaced = lock(&self.sessions)
            .insert(id, Arc::new(Mutex::new(game.clone())))
            .is_some();
        info!(replaced, "Game started");
        game
    }

    /// Returns a snapshot of the game for `id`, if one is active.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn get(&self, id: SessionId) -> Option<Game> {
        self.with_game(id, |game| game.clone())
    }

    /// Runs `f` on the game for `id` while holding that game's lock.
    ///
    /// Returns `None` without calling `f` when no game is active.
    #[instrument(skip(self, f), fields(session_id = %id))]
    pub fn with_game<R>(&self, id: SessionId, f: impl FnOnce(&mut Game) -> R) -> Option<R> {
        let Some(session) = lock(&self.sessions).get(&id).cloned() else {
            debug!("Session not found");
            return None;
        };
        let mut game = lock(&session);
        Some(f(&mut *game))
    }

    /// Removes the game for `id`. Returns whether one was active.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn end(&self, id: SessionId) -> bool {
        let removed = lock(&self.sessions).remove(&id).is_some();
        if removed {
            info!("Game ended");
        } else {
            debug!("No game to end");
        }
        removed
    }

    /// Returns true if `id` has an active game.
    pub fn contains(&self, id: SessionId) -> bool {
        lock(&self.sessions).contains_key(&id)
    }

    /// Number of active games.
    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Returns true if no games are active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
