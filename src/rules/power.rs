//! Effective card power.
//!
//! Power is never stored. It is computed when a skirmish is scored, from the
//! printed value and whatever else is in play at the same environment:
//!
//! 1. Base power (dynamic cards resolve by title)
//! 2. Water: +2 to every Electric card, -2 to every Fire card, per Water card
//! 3. Acolyte: +3 while the owner has strictly more Acolytes in play than
//!    every opponent
//!
//! The result is floored at zero.

use crate::cards::{CardType, PlayerCard, Power, CHANNEL_POWER};
use crate::core::{EnvironmentState, PlayerId};

const WATER_MODIFIER: i32 = 2;
const ACOLYTE_BONUS: i32 = 3;

/// Board context for one card's owner.
#[derive(Clone, Copy, Debug)]
pub struct PowerContext<'a> {
    pub environment: &'a EnvironmentState,
    pub owner: &'a PlayerId,
    /// Everyone seated, owner included.
    pub players: &'a [PlayerId],
}

impl<'a> PowerContext<'a> {
    #[must_use]
    pub fn new(environment: &'a EnvironmentState, owner: &'a PlayerId, players: &'a [PlayerId]) -> Self {
        Self {
            environment,
            owner,
            players,
        }
    }

    pub fn opponents(&self) -> impl Iterator<Item = &'a PlayerId> + '_ {
        self.players.iter().filter(move |p| *p != self.owner)
    }
}

/// True when `player` has strictly more Acolytes in play at `environment`
/// than each opponent. Vacuously true with no opponents.
#[must_use]
pub fn has_acolyte_majority(
    environment: &EnvironmentState,
    player: &PlayerId,
    players: &[PlayerId],
) -> bool {
    let mine = environment.count_type(player, CardType::Acolyte);
    players
        .iter()
        .filter(|p| *p != player)
        .all(|p| mine > environment.count_type(p, CardType::Acolyte))
}

/// Printed power, with dynamic cards resolved against the board.
#[must_use]
pub fn base_power(card: &PlayerCard, ctx: &PowerContext<'_>) -> i32 {
    match card.power {
        Power::Fixed(power) => power,
        Power::Dynamic if card.title == CHANNEL_POWER => ctx
            .opponents()
            .map(|p| ctx.environment.in_play_count(p))
            .max()
            .map_or(0, |count| i32::try_from(count).unwrap_or(i32::MAX)),
        Power::Dynamic => 0,
    }
}

/// Power a card contributes when scored.
///
/// ## Example
///
/// ```
/// use skirmish_engine::cards::{CardType, Environment, PlayerCard, Power};
/// use skirmish_engine::core::{CardId, EnvironmentId, EnvironmentState, PlayerId};
/// use skirmish_engine::rules::{effective_power, PowerContext};
///
/// let card = |id, card_type, power| PlayerCard {
///     id: CardId::new(id),
///     title: String::new(),
///     card_type,
///     power: Power::Fixed(power),
///     effect: String::new(),
///     image: String::new(),
/// };
/// let mut env = EnvironmentState::new(Environment {
///     id: EnvironmentId::new(100),
///     title: "Oasis".into(),
///     description: String::new(),
///     image: String::new(),
/// });
///
/// let me = PlayerId::from("p1");
/// let fire = card(1, CardType::Fire, 6);
/// env.put_in_play(&me, fire.clone());
/// env.put_in_play(&me, card(2, CardType::Water, 1));
///
/// let players = [me.clone()];
/// let ctx = PowerContext::new(&env, &me, &players);
/// assert_eq!(effective_power(&fire, &ctx), 4);
/// ```
#[must_use]
pub fn effective_power(card: &PlayerCard, ctx: &PowerContext<'_>) -> i32 {
    let mut power = base_power(card, ctx);

    let water = i32::try_from(ctx.environment.total_of_type(CardType::Water)).unwrap_or(i32::MAX);
    match card.card_type {
        CardType::Electric => power = power.saturating_add(water.saturating_mul(WATER_MODIFIER)),
        CardType::Fire => power = power.saturating_sub(water.saturating_mul(WATER_MODIFIER)),
        _ => {}
    }

    if card.is(CardType::Acolyte) && has_acolyte_majority(ctx.environment, ctx.owner, ctx.players) {
        power = power.saturating_add(ACOLYTE_BONUS);
    }

    power.max(0)
}

/// Sum of effective power over a player's cards in play.
#[must_use]
pub fn total_power(ctx: &PowerContext<'_>) -> i32 {
    ctx.environment
        .in_play(ctx.owner)
        .map(|card| effective_power(card, ctx))
        .fold(0i32, i32::saturating_add)
}
