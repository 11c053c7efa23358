//! Whether a card may be played.
//!
//! A play is checked against the board-wide rule first (no Beasts while any
//! Fire is in play), then against the environment's own rule from the
//! [`RuleBook`]. The first restriction hit wins.

use serde::{Deserialize, Serialize};

use super::environments::RuleBook;
use crate::cards::{CardType, PlayerCard};
use crate::core::{EnvironmentState, PlayerId};

/// Outcome of a legality check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Legality {
    Allowed,
    /// Forbidden, with a reason suitable for the player.
    Forbidden(String),
}

impl Legality {
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Legality::Forbidden(reason.into())
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Legality::Allowed)
    }

    /// Run `next` only if this check allowed the play.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Legality) -> Legality {
        match self {
            Legality::Allowed => next(),
            forbidden => forbidden,
        }
    }
}

/// A proposed play.
#[derive(Clone, Copy, Debug)]
pub struct PlayContext<'a> {
    pub card: &'a PlayerCard,
    pub player: &'a PlayerId,
    pub environment: &'a EnvironmentState,
    /// Everyone seated, player included.
    pub players: &'a [PlayerId],
}

/// Restrictions that hold at every environment.
#[must_use]
pub fn check_global(ctx: &PlayContext<'_>) -> Legality {
    if ctx.card.is(CardType::Beast) && ctx.environment.total_of_type(CardType::Fire) > 0 {
        return Legality::forbidden("Cannot play a Beast while a Fire card is in play here");
    }
    Legality::Allowed
}

/// Full legality check for a play.
#[must_use]
pub fn check_play(ctx: &PlayContext<'_>, rules: &RuleBook) -> Legality {
    check_global(ctx).and_then(|| rules.get(ctx.environment.title()).check_play(ctx))
}
