//! Cards: immutable definitions, the printed catalog, and the deck factory.
//!
//! ## Key Types
//!
//! - `PlayerCard`: One physical card in a player's deck
//! - `Environment`: A board location
//! - `Item`: A board resource taken by discarding cards
//! - `CardType`: The seven player-card categories
//!
//! Ids are attached by the deck factory when a copy is dealt into a game.

pub mod catalog;
pub mod deck;
pub mod definition;

pub use catalog::{CardTemplate, EnvironmentTemplate, ItemTemplate, CHANNEL_POWER};
pub use definition::{
    image_path, CardType, DiscardCost, Environment, Item, ItemCategory, PlayerCard, Power,
};
