//! Deck factory.
//!
//! Turns the static catalog into shuffled, id-stamped decks. Every function
//! here is pure apart from the RNG and id allocator it is handed, so a fixed
//! seed reproduces a whole game's deal.

use im::Vector;

use super::catalog::{ENVIRONMENTS, ITEMS, PLAYER_CARDS};
use super::definition::{image_path, Environment, Item, PlayerCard};
use crate::core::{EnvironmentState, GameRng, IdAllocator};

const PLAYER_FOLDER: &str = "Player Decks";
const ENVIRONMENT_FOLDER: &str = "Environments";
const ITEM_FOLDER: &str = "Items";

fn shuffled<T: Clone>(mut cards: Vec<T>, rng: &mut GameRng) -> Vector<T> {
    rng.shuffle(&mut cards);
    cards.into_iter().collect()
}

/// A shuffled copy of the full player-card list.
pub fn player_deck(rng: &mut GameRng, ids: &mut IdAllocator) -> Vector<PlayerCard> {
    let cards = PLAYER_CARDS
        .iter()
        .map(|t| PlayerCard {
            id: ids.card(),
            title: t.title.to_string(),
            card_type: t.card_type,
            power: t.power,
            effect: t.effect.to_string(),
            image: image_path(PLAYER_FOLDER, t.title),
        })
        .collect();
    shuffled(cards, rng)
}

/// The shuffled environment deck.
pub fn environment_deck(rng: &mut GameRng, ids: &mut IdAllocator) -> Vector<Environment> {
    let environments = ENVIRONMENTS
        .iter()
        .map(|t| Environment {
            id: ids.environment(),
            title: t.title.to_string(),
            description: t.description.to_string(),
            image: image_path(ENVIRONMENT_FOLDER, t.title),
        })
        .collect();
    shuffled(environments, rng)
}

/// The shuffled item deck.
pub fn item_deck(rng: &mut GameRng, ids: &mut IdAllocator) -> Vector<Item> {
    let items = ITEMS
        .iter()
        .map(|t| Item {
            id: ids.item(),
            title: t.title.to_string(),
            category: t.category,
            description: t.description.to_string(),
            discard_cost: t.discard_cost,
            image: image_path(ITEM_FOLDER, t.title),
        })
        .collect();
    shuffled(items, rng)
}

/// Draw up to `count` items from the front of the item deck.
pub fn draw_items(item_deck: &mut Vector<Item>, count: usize) -> Vector<Item> {
    let take = count.min(item_deck.len());
    let rest = item_deck.split_off(take);
    std::mem::replace(item_deck, rest)
}

/// Draw the next environment and seed it with items.
///
/// Returns `None` when the environment deck is exhausted.
pub fn deal_environment(
    environment_deck: &mut Vector<Environment>,
    item_deck: &mut Vector<Item>,
    items_per_environment: usize,
) -> Option<EnvironmentState> {
    let environment = environment_deck.pop_front()?;
    let mut state = EnvironmentState::new(environment);
    state.items = draw_items(item_deck, items_per_environment);
    Some(state)
}

/// Deal the opening board.
pub fn deal_board(
    count: usize,
    environment_deck: &mut Vector<Environment>,
    item_deck: &mut Vector<Item>,
    items_per_environment: usize,
) -> Vector<EnvironmentState> {
    (0..count)
        .map_while(|_| deal_environment(environment_deck, item_deck, items_per_environment))
        .collect()
}
