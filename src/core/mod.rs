//! Core types: ids, players, state, actions, RNG, configuration, errors.
//!
//! Nothing in here knows the game's rules; the `rules` and `engine` modules
//! give these types their meaning.

pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionEnvelope, ActionRecord, ActionType, Command, DiscardList, Payload};
pub use config::{GameConfig, GameLength, PassPolicy, MAX_PLAYERS};
pub use error::{ErrorCode, GameError, GameResult};
pub use ids::{CardId, EnvironmentId, GameId, IdAllocator, ItemId, PlayerId};
pub use player::{Player, PlayerColor};
pub use rng::{GameRng, GameRngState};
pub use state::{CardsByPlayer, EnvironmentState, GameState, Phase, Skirmish, Standing};
