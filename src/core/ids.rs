//! Identifiers for games, players, and board objects.
//!
//! ## ID Layout
//!
//! Cards, environments, and items share one allocation counter owned by
//! `GameState`, so an id is unique across every zone of a game:
//!
//! ```
//! use skirmish_engine::core::{CardId, EnvironmentId};
//!
//! let card = CardId::new(7);
//! let env = EnvironmentId::new(8);
//! assert_eq!(card.raw() + 1, env.raw());
//! ```
//!
//! Player and game ids are strings chosen by the transport layer.

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

numeric_id!(
    /// Identity of one physical player card.
    ///
    /// The same id follows the card through hand, prepared storage, play,
    /// and the discard pile. Cards are never re-issued with new ids.
    CardId,
    "Card"
);

numeric_id!(
    /// Identity of an environment drawn onto the board.
    EnvironmentId,
    "Environment"
);

numeric_id!(
    /// Identity of an item card.
    ItemId,
    "Item"
);

/// Allocator for card, environment, and item ids within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdAllocator(u32);

impl IdAllocator {
    /// Start allocating at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self(1)
    }

    fn next_raw(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }

    pub fn card(&mut self) -> CardId {
        CardId(self.next_raw())
    }

    pub fn environment(&mut self) -> EnvironmentId {
        EnvironmentId(self.next_raw())
    }

    pub fn item(&mut self) -> ItemId {
        ItemId(self.next_raw())
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Player identifier supplied by the transport layer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Game identifier. Generated as a v4 UUID unless the caller injects one.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Create a game id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random game id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids() {
        let card = CardId::new(42);
        assert_eq!(card.raw(), 42);
        assert_eq!(format!("{}", card), "Card(42)");
        assert_eq!(format!("{}", EnvironmentId(3)), "Environment(3)");
        assert_eq!(format!("{}", ItemId(9)), "Item(9)");
        assert_eq!(CardId::from(5), CardId(5));
    }

    #[test]
    fn test_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&CardId(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&PlayerId::new("p1")).unwrap(), "\"p1\"");

        let back: ItemId = serde_json::from_str("77").unwrap();
        assert_eq!(back, ItemId(77));
    }

    #[test]
    fn test_generated_game_ids_differ() {
        let a = GameId::generate();
        let b = GameId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_allocator_shares_counter() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.card(), CardId(1));
        assert_eq!(ids.environment(), EnvironmentId(2));
        assert_eq!(ids.item(), ItemId(3));
        assert_eq!(ids.card(), CardId(4));
    }

    #[test]
    fn test_player_id_display() {
        let player = PlayerId::from("alice");
        assert_eq!(player.as_str(), "alice");
        assert_eq!(format!("{}", player), "alice");
    }
}
