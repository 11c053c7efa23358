//! Game rules: legality, power, scoring, and per-environment behavior.
//!
//! Everything here is a pure function of the board except the
//! `EnvironmentRule` hooks, which the engine hands the state to mutate.

pub mod environments;
pub mod legality;
pub mod power;
pub mod scoring;

pub use environments::{
    Badlands, Desert, EnvironmentRule, Graveyard, HallowedGround, Permissive, RuleBook, Volcano,
};
pub use legality::{check_global, check_play, Legality, PlayContext};
pub use power::{base_power, effective_power, has_acolyte_majority, total_power, PowerContext};
pub use scoring::{determine_winner, score_environment, ScoreResult};
