//! Shared registry of running games.
//!
//! Games are independent, so the registry only needs to hand out the right
//! engine. Each engine sits behind its own mutex, held for the whole of one
//! entry-point call: actions on one game are strictly serialized while
//! different games proceed in parallel.
//!
//! ## Example
//!
//! ```
//! use skirmish_engine::core::{Action, GameConfig, Phase};
//! use skirmish_engine::registry::{GameRepository, InMemoryRepository};
//!
//! let games = InMemoryRepository::new();
//! let id = games.create(GameConfig::new().with_seed(1));
//!
//! games.join(&id, "p1", "Alice").unwrap();
//! games.join(&id, "p2", "Bob").unwrap();
//! games.dispatch(&id, &Action::ready_up("p1")).unwrap();
//! games.dispatch(&id, &Action::ready_up("p2")).unwrap();
//!
//! let phase = games.get(&id).map(|game| game.lock().phase());
//! assert_eq!(phase, Some(Phase::Handbuilding));
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::core::{Action, GameConfig, GameError, GameId, GameResult, PlayerId};
use crate::engine::{Engine, GameEvent};

/// An engine shared between request handlers.
pub type SharedEngine = Arc<Mutex<Engine>>;

/// Storage for running games.
pub trait GameRepository: Send + Sync {
    /// Register an existing engine under its own game id.
    fn insert(&self, engine: Engine) -> GameId;

    fn get(&self, id: &GameId) -> Option<SharedEngine>;

    fn remove(&self, id: &GameId) -> Option<SharedEngine>;

    /// Remove a game only if nobody is seated in it, closing it to joins.
    /// The emptiness check and the removal happen under the same locks.
    fn remove_if_empty(&self, id: &GameId) -> bool;

    /// Ids of every registered game, sorted.
    fn list(&self) -> Vec<GameId>;

    /// Create and register a new game.
    fn create(&self, config: GameConfig) -> GameId {
        self.insert(Engine::new(config))
    }

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run an action against a game, holding its lock for the whole call.
    fn dispatch(&self, id: &GameId, action: &Action) -> GameResult<Vec<GameEvent>> {
        let game = self.get(id).ok_or_else(GameError::game_not_found)?;
        let mut engine = game.lock();
        engine.process(action)
    }

    /// Seat a player in a game.
    fn join(
        &self,
        id: &GameId,
        player: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> GameResult<Vec<GameEvent>>
    where
        Self: Sized,
    {
        let game = self.get(id).ok_or_else(GameError::game_not_found)?;
        let mut engine = game.lock();
        engine.add_player(player, name)
    }

    /// Unseat a player. A game left with nobody in it is removed.
    fn leave(&self, id: &GameId, player: &PlayerId) -> GameResult<Vec<GameEvent>> {
        let game = self.get(id).ok_or_else(GameError::game_not_found)?;
        let (events, empty) = {
            let mut engine = game.lock();
            let events = engine.remove_player(player)?;
            (events, engine.is_empty())
        };
        // Someone may have joined since the lock was released.
        if empty && self.remove_if_empty(id) {
            info!(game = %id, "empty game removed");
        }
        Ok(events)
    }
}

/// Process-local repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    games: RwLock<FxHashMap<GameId, SharedEngine>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameRepository for InMemoryRepository {
    fn insert(&self, engine: Engine) -> GameId {
        let id = engine.game_id().clone();
        debug!(game = %id, "game registered");
        self.games
            .write()
            .insert(id.clone(), Arc::new(Mutex::new(engine)));
        id
    }

    fn get(&self, id: &GameId) -> Option<SharedEngine> {
        self.games.read().get(id).cloned()
    }

    fn remove(&self, id: &GameId) -> Option<SharedEngine> {
        self.games.write().remove(id)
    }

    fn remove_if_empty(&self, id: &GameId) -> bool {
        let mut games = self.games.write();
        let Some(game) = games.get(id).cloned() else {
            return false;
        };
        let mut engine = game.lock();
        if !engine.is_empty() {
            return false;
        }
        engine.close();
        games.remove(id);
        true
    }

    fn list(&self) -> Vec<GameId> {
        let mut ids: Vec<_> = self.games.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    fn len(&self) -> usize {
        self.games.read().len()
    }
}
