//! Card, environment, and item values.
//!
//! These are immutable once dealt. A `PlayerCard` keeps its `CardId` for
//! the whole game as it moves between zones; only the zone changes.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, EnvironmentId, ItemId};

/// The seven player-card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    Acolyte,
    Beast,
    Colossus,
    #[serde(rename = "Divine Gift")]
    DivineGift,
    Electric,
    Fire,
    Water,
}

impl CardType {
    /// All categories in display order.
    pub const ALL: [CardType; 7] = [
        CardType::Acolyte,
        CardType::Beast,
        CardType::Colossus,
        CardType::DivineGift,
        CardType::Electric,
        CardType::Fire,
        CardType::Water,
    ];

    /// Printed name of the category.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardType::Acolyte => "Acolyte",
            CardType::Beast => "Beast",
            CardType::Colossus => "Colossus",
            CardType::DivineGift => "Divine Gift",
            CardType::Electric => "Electric",
            CardType::Fire => "Fire",
            CardType::Water => "Water",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Printed base power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Power {
    /// A fixed number (may be negative, e.g. Curse).
    Fixed(i32),
    /// Printed as "?"; resolved from the board by card identity.
    Dynamic,
}

/// A player card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCard {
    pub id: CardId,
    pub title: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub power: Power,
    pub effect: String,
    pub image: String,
}

impl PlayerCard {
    /// Check the card's category.
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.card_type == card_type
    }
}

/// A board location.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Persistent bonus while the skirmish lasts.
    Perk,
    /// One-time effect.
    Discard,
}

/// Cards that must be discarded from hand to take an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardCost {
    /// Exactly this many cards.
    Fixed(u32),
    /// Printed as "?"; the player chooses how many.
    Variable,
}

/// An item card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub category: ItemCategory,
    pub description: String,
    pub discard_cost: DiscardCost,
    pub image: String,
}

/// Image path for a title: lowercase, whitespace runs replaced by `-`.
///
/// ```
/// use skirmish_engine::cards::image_path;
///
/// assert_eq!(image_path("Items", "Secret Tunnel Keys"), "/cards/Items/secret-tunnel-keys.png");
/// ```
#[must_use]
pub fn image_path(folder: &str, title: &str) -> String {
    let slug = title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("/cards/{folder}/{slug}.png")
}
