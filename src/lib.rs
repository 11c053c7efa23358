//! # skirmish-engine
//!
//! Authoritative, server-side rules engine for a multi-player card game
//! where players prepare cards face-down on shared environments and then
//! fight skirmishes over them.
//!
//! ## Design Principles
//!
//! 1. **One Pipeline**: Every change to a game goes through an `Engine` entry
//!    point. Each one validates fully, then mutates, then reports the events
//!    it produced. A rejected request leaves the state untouched.
//!
//! 2. **N-Player First**: Two to four players, seated in join order. Rules
//!    compare a player against *every* opponent, never just "the" opponent.
//!
//! 3. **Rules as Data**: Per-environment behavior lives in a `RuleBook` of
//!    `EnvironmentRule` objects keyed by title. Unregistered environments are
//!    permissive.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state snapshots via `im-rs`.
//!
//! - **Explicit Events**: Entry points return their events; there are no
//!   callbacks into caller code.
//!
//! - **Serializable State**: The whole game, RNG position included, round-trips
//!   through `bincode` or JSON.
//!
//! ## Modules
//!
//! - `core`: Ids, players, state, actions, RNG, configuration, errors
//! - `cards`: Card definitions, the printed catalog, the deck factory
//! - `rules`: Legality, power, scoring, environment rules
//! - `engine`: Action dispatch, phase transitions, events
//! - `registry`: Shared store of running games

pub mod cards;
pub mod core;
pub mod engine;
pub mod registry;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ActionType, CardId, Command, EnvironmentId, EnvironmentState, ErrorCode,
    GameConfig, GameError, GameId, GameLength, GameResult, GameRng, GameState, ItemId, PassPolicy,
    Phase, Player, PlayerColor, PlayerId,
};

pub use crate::cards::{CardType, Environment, Item, PlayerCard, Power};

pub use crate::rules::{EnvironmentRule, Legality, RuleBook, ScoreResult};

pub use crate::engine::{Engine, EventKind, EventSink, GameEvent};

pub use crate::registry::{GameRepository, InMemoryRepository, SharedEngine};
