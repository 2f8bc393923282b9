//! Session-to-game mapping.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::engine::Game;
use crate::error::CoreResult;
use crate::traits::VectorStore;
use crate::types::{GameMode, SessionId};

/// A game shared between the registry and its callers.
///
/// The mutex serializes operations on one game, including across the
/// store round-trips inside a guess.
pub type SharedGame = Arc<Mutex<Game>>;

/// Active games keyed by session (e.g. chat channel).
///
/// The only process-wide mutable state. Writes for one session key are
/// mutually exclusive with other reads and writes of that key; different
/// keys never contend beyond the map's sharding.
pub struct GameRegistry {
    store: Arc<dyn VectorStore>,
    games: DashMap<SessionId, SharedGame>,
}

impl GameRegistry {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            store,
            games: DashMap::new(),
        }
    }

    /// The store new games are created with.
    pub fn store(&self) -> Arc<dyn VectorStore> {
        Arc::clone(&self.store)
    }

    /// Start a new game and make it the session's active game.
    ///
    /// The game is started before it is published, so a failed start
    /// (e.g. unknown secret) leaves any previous game in place.
    #[instrument(level = "debug", skip(self, secret), fields(session = %session))]
    pub async fn create_game(
        &self,
        session: &str,
        secret: &str,
        mode: GameMode,
    ) -> CoreResult<SharedGame> {
        let mut game = Game::new(self.store());
        game.start(secret, mode).await?;

        let shared = Arc::new(Mutex::new(game));
        let replaced = self
            .games
            .insert(session.to_string(), Arc::clone(&shared))
            .is_some();
        info!(session = %session, mode = %mode, replaced, "Game created");
        Ok(shared)
    }

    /// The session's active game, if any.
    pub fn get_game(&self, session: &str) -> Option<SharedGame> {
        self.games.get(session).map(|entry| Arc::clone(entry.value()))
    }

    /// Install `game` as the session's active game, returning the one it replaced.
    pub fn replace_game(&self, session: &str, game: Game) -> Option<SharedGame> {
        let previous = self
            .games
            .insert(session.to_string(), Arc::new(Mutex::new(game)));
        debug!(session = %session, replaced = previous.is_some(), "Game replaced");
        previous
    }

    /// Drop the session's game.
    pub fn remove_game(&self, session: &str) -> Option<SharedGame> {
        self.games.remove(session).map(|(_, game)| game)
    }

    /// Sessions that currently have a game, sorted.
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.games.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
