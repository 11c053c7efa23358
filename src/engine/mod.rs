//! The authoritative game engine.
//!
//! An [`Engine`] owns one game's [`GameState`] and is the only thing that
//! changes it. Every entry point either succeeds, committing the new state
//! and returning the events it produced, or fails with a [`GameError`] and
//! leaves the state exactly as it was.
//!
//! ## Staging
//!
//! Each entry point runs against a staged copy of the state. `GameState` is
//! built from `im` persistent structures, so the copy is O(1) and only the
//! parts that change are duplicated. The copy replaces the live state only
//! when the whole operation succeeds.
//!
//! ## Example
//!
//! ```
//! use skirmish_engine::core::{Action, GameConfig, Phase};
//! use skirmish_engine::engine::Engine;
//!
//! let mut engine = Engine::new(GameConfig::new().with_seed(7));
//! engine.add_player("p1", "Alice").unwrap();
//! engine.add_player("p2", "Bob").unwrap();
//!
//! engine.process(&Action::ready_up("p1")).unwrap();
//! let events = engine.process(&Action::ready_up("p2")).unwrap();
//!
//! assert_eq!(engine.phase(), Phase::Handbuilding);
//! assert_eq!(events.last().map(|e| e.name()), Some("GAME_UPDATED"));
//! assert!(engine.players().iter().all(|p| p.hand.len() == 3));
//! ```

mod dispatch;
pub mod events;
mod phases;

pub use events::{EventKind, EventSink, GameEvent};

use chrono::Utc;
use im::Vector;
use tracing::warn;

use crate::core::{
    Action, ActionRecord, GameConfig, GameError, GameId, GameResult, GameState, Phase, Player,
    PlayerId,
};
use crate::rules::RuleBook;
use events::EventBuffer;

/// One game's rules engine.
#[derive(Clone, Debug)]
pub struct Engine {
    state: GameState,
    rules: RuleBook,
    /// Set once the game is dropped from its registry; no one may join after.
    closed: bool,
}

/// A staged state plus the events it has produced so far.
pub(crate) struct Step<'a> {
    pub(crate) state: GameState,
    pub(crate) rules: &'a RuleBook,
    pub(crate) events: EventBuffer,
}

impl<'a> Step<'a> {
    fn new(state: GameState, rules: &'a RuleBook) -> Self {
        let events = EventBuffer::new(state.game_id.clone());
        Self {
            state,
            rules,
            events,
        }
    }
}

impl Engine {
    /// Create a game with a generated id.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_game_id(GameId::generate(), config)
    }

    /// Create a game with a caller-chosen id.
    #[must_use]
    pub fn with_game_id(game_id: impl Into<GameId>, config: GameConfig) -> Self {
        Self::restore(GameState::new(game_id.into(), config))
    }

    /// Resume a game from a saved state, with the built-in rules.
    #[must_use]
    pub fn restore(state: GameState) -> Self {
        Self {
            state,
            rules: RuleBook::standard(),
            closed: false,
        }
    }

    /// Replace the environment rule book.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.rules = rules;
        self
    }

    // === Entry points ===

    /// Validate and apply one action.
    pub fn process(&mut self, action: &Action) -> GameResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        self.process_into(action, &mut events)?;
        Ok(events)
    }

    /// Like [`Engine::process`], delivering events to `sink`.
    pub fn process_into<S: EventSink + ?Sized>(&mut self, action: &Action, sink: &mut S) -> GameResult<()> {
        let result = self.apply(sink, |step| step.dispatch(action));
        if let Err(err) = &result {
            warn!(
                game = %self.state.game_id,
                player = %action.player,
                action = %action.action_type(),
                code = %err.code,
                "rejected: {}",
                err.message
            );
        }
        result
    }

    /// Seat a player. Only allowed during setup, and never once closed.
    pub fn add_player(&mut self, id: impl Into<PlayerId>, name: impl Into<String>) -> GameResult<Vec<GameEvent>> {
        if self.closed {
            return Err(GameError::game_not_found());
        }
        let id = id.into();
        let name = name.into();
        self.collect(|step| step.add_player(id, name))
    }

    /// Unseat a player, ending the game if too few remain.
    pub fn remove_player(&mut self, id: &PlayerId) -> GameResult<Vec<GameEvent>> {
        self.collect(|step| step.remove_player(id))
    }

    /// Set a player's ready flag during setup.
    pub fn set_player_ready(&mut self, id: &PlayerId, ready: bool) -> GameResult<Vec<GameEvent>> {
        self.collect(|step| {
            if step.state.player(id).is_none() {
                return Err(GameError::player_not_in_game());
            }
            step.set_ready(id, ready)
        })
    }

    /// Record a connect or disconnect. Unknown players produce no events.
    pub fn set_player_connection(&mut self, id: &PlayerId, connected: bool) -> Vec<GameEvent> {
        self.collect(|step| {
            step.set_connection(id, connected);
            Ok(())
        })
        .unwrap_or_default()
    }

    /// Refuse further joins.
    pub fn close(&mut self) {
        self.closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn collect<F>(&mut self, op: F) -> GameResult<Vec<GameEvent>>
    where
        F: FnOnce(&mut Step<'_>) -> GameResult<()>,
    {
        let mut events = Vec::new();
        self.apply(&mut events, op)?;
        Ok(events)
    }

    fn apply<S, F>(&mut self, sink: &mut S, op: F) -> GameResult<()>
    where
        S: EventSink + ?Sized,
        F: FnOnce(&mut Step<'_>) -> GameResult<()>,
    {
        let mut step = Step::new(self.state.clone(), &self.rules);
        op(&mut step)?;

        let Step { mut state, events, .. } = step;
        if !events.is_empty() {
            state.updated_at = Utc::now();
        }
        self.state = state;
        events.flush(sink);
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.state.game_id
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// An owned copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    #[must_use]
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.state.players
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.state.action_history
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.state.player_count() >= self.state.config.max_players
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.players.is_empty()
    }

    /// Whether the player could act right now.
    ///
    /// During setup any seated player may ready up; afterwards only the
    /// current player may act, and in a skirmish only while they hold cards
    /// and have not passed.
    #[must_use]
    pub fn can_player_act(&self, id: &PlayerId) -> bool {
        let Some(player) = self.state.player(id) else {
            return false;
        };
        match self.state.phase {
            Phase::Setup => true,
            Phase::Handbuilding => self.state.is_current(id),
            Phase::Skirmish => self.state.is_current(id) && player.in_skirmish(),
            Phase::Finished => false,
        }
    }

    // === Persistence ===

    /// Compact binary encoding of the state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(&self.state)
    }

    /// Restore from [`Engine::to_bytes`] output, with the built-in rules.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes).map(Self::restore)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self::restore)
    }
}
