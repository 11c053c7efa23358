//! Seated players.
//!
//! ## Colors
//!
//! Colors come from a fixed palette and are assigned by join slot. A slot is
//! consumed even if its player later leaves, so a color is never handed out
//! twice in one game.
//!
//! ## Card Zones
//!
//! A player owns three ordered zones: `hand`, `deck` (front is the next
//! draw), and `discard`. Prepared and in-play cards live on the board, keyed
//! by player id.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::ids::{CardId, PlayerId};
use crate::cards::PlayerCard;

/// Player colors, in join order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Black,
    Brown,
    Tan,
    White,
}

impl PlayerColor {
    /// The palette in slot order.
    pub const PALETTE: [PlayerColor; 4] = [
        PlayerColor::Black,
        PlayerColor::Brown,
        PlayerColor::Tan,
        PlayerColor::White,
    ];

    /// Color for a join slot, or `None` once the palette is exhausted.
    ///
    /// ```
    /// use skirmish_engine::core::PlayerColor;
    ///
    /// assert_eq!(PlayerColor::for_slot(0), Some(PlayerColor::Black));
    /// assert_eq!(PlayerColor::for_slot(3), Some(PlayerColor::White));
    /// assert_eq!(PlayerColor::for_slot(4), None);
    /// ```
    #[must_use]
    pub fn for_slot(slot: usize) -> Option<PlayerColor> {
        Self::PALETTE.get(slot).copied()
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub hand: Vector<PlayerCard>,
    pub deck: Vector<PlayerCard>,
    pub discard: Vector<PlayerCard>,
    pub skirmishes_won: u32,
    pub is_ready: bool,
    pub is_connected: bool,
    pub has_passed: bool,
}

impl Player {
    /// Seat a new player holding a freshly dealt deck.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: PlayerColor,
        deck: Vector<PlayerCard>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            hand: Vector::new(),
            deck,
            discard: Vector::new(),
            skirmishes_won: 0,
            is_ready: false,
            is_connected: true,
            has_passed: false,
        }
    }

    /// Draw up to `count` cards from the front of the deck.
    ///
    /// Returns the number actually drawn; an empty deck stops the draw.
    pub fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            match self.deck.pop_front() {
                Some(card) => {
                    self.hand.push_back(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Draw until the hand holds `size` cards (or the deck runs out).
    pub fn draw_to(&mut self, size: usize) -> usize {
        self.draw(size.saturating_sub(self.hand.len()))
    }

    #[must_use]
    pub fn hand_index(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card)
    }

    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand_index(card).is_some()
    }

    /// Remove a card from the hand, preserving the order of the rest.
    pub fn take_from_hand(&mut self, card: CardId) -> Option<PlayerCard> {
        let index = self.hand_index(card)?;
        Some(self.hand.remove(index))
    }

    /// Move the given hand cards to the discard pile.
    ///
    /// Ids not in hand are ignored; callers validate first.
    pub fn discard_from_hand(&mut self, cards: &[CardId]) {
        for &id in cards {
            if let Some(card) = self.take_from_hand(id) {
                self.discard.push_back(card);
            }
        }
    }

    /// Trim the hand from the end down to `limit`, discarding the excess.
    ///
    /// Returns the number of cards discarded.
    pub fn trim_hand(&mut self, limit: usize) -> usize {
        let mut trimmed = 0;
        while self.hand.len() > limit {
            if let Some(card) = self.hand.pop_back() {
                // Keep discard order matching the hand's order.
                self.discard.insert(self.discard.len() - trimmed, card);
                trimmed += 1;
            }
        }
        trimmed
    }

    /// Discard the whole hand.
    pub fn discard_hand(&mut self) -> Vector<PlayerCard> {
        let hand = std::mem::take(&mut self.hand);
        self.discard.append(hand.clone());
        hand
    }

    /// True while the player may still act in a skirmish.
    #[must_use]
    pub fn in_skirmish(&self) -> bool {
        !self.has_passed && !self.hand.is_empty()
    }
}
