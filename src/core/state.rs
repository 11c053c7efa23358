//! Game state: the canonical aggregate owned by one engine.
//!
//! ## GameState
//!
//! Everything needed to continue a game:
//! - Phase, turn counter, seated players, whose turn it is
//! - The board (three environment slots) and face-down prepared cards
//! - Remaining environment and item decks
//! - The active skirmish, if any
//! - Config, RNG position, id allocator, and action history
//!
//! All collections are `im` persistent structures, so cloning a state for a
//! snapshot is O(1) and the clone shares nothing mutable with the original.

use chrono::{DateTime, Utc};
use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::ids::{EnvironmentId, GameId, IdAllocator, ItemId, PlayerId};
use super::player::Player;
use super::rng::GameRng;
use crate::cards::{deck, CardType, Environment, Item, PlayerCard};

/// Game phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Players join and ready up.
    #[default]
    Setup,
    /// Players prepare cards face-down.
    Handbuilding,
    /// Players play cards at one environment.
    Skirmish,
    /// The game is over.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Handbuilding => "handbuilding",
            Phase::Skirmish => "skirmish",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Cards grouped by owner.
pub type CardsByPlayer = OrdMap<PlayerId, Vector<PlayerCard>>;

/// One environment on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentState {
    pub environment: Environment,
    /// Items waiting to be taken.
    pub items: Vector<Item>,
    /// Cards in play during a skirmish here.
    pub cards_in_play: CardsByPlayer,
    /// Items taken during a skirmish here.
    pub claimed_items: OrdMap<PlayerId, Vector<Item>>,
}

impl EnvironmentState {
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            items: Vector::new(),
            cards_in_play: OrdMap::new(),
            claimed_items: OrdMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EnvironmentId {
        self.environment.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.environment.title
    }

    /// A player's cards in play here, in play order.
    pub fn in_play(&self, player: &PlayerId) -> impl Iterator<Item = &PlayerCard> + '_ {
        self.cards_in_play.get(player).into_iter().flatten()
    }

    #[must_use]
    pub fn in_play_count(&self, player: &PlayerId) -> usize {
        self.cards_in_play.get(player).map_or(0, Vector::len)
    }

    /// Cards of one type a player has in play here.
    #[must_use]
    pub fn count_type(&self, player: &PlayerId, card_type: CardType) -> usize {
        self.in_play(player).filter(|c| c.is(card_type)).count()
    }

    /// Cards of one type in play here across all players.
    #[must_use]
    pub fn total_of_type(&self, card_type: CardType) -> usize {
        self.all_in_play().filter(|c| c.is(card_type)).count()
    }

    pub fn all_in_play(&self) -> impl Iterator<Item = &PlayerCard> + '_ {
        self.cards_in_play.values().flatten()
    }

    pub fn put_in_play(&mut self, player: &PlayerId, card: PlayerCard) {
        self.cards_in_play
            .entry(player.clone())
            .or_insert_with(Vector::new)
            .push_back(card);
    }

    #[must_use]
    pub fn item_index(&self, item: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == item)
    }
}

/// The skirmish in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skirmish {
    pub environment: EnvironmentId,
    pub initiator: PlayerId,
}

/// A player's final result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub skirmishes_won: u32,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: GameId,
    pub config: GameConfig,
    pub phase: Phase,
    pub turn: u32,
    pub players: Vector<Player>,
    pub current_player_index: usize,

    /// The board, in slot order.
    pub environments: Vector<EnvironmentState>,

    /// Face-down prepared cards: environment -> player -> cards.
    pub prepared: OrdMap<EnvironmentId, CardsByPlayer>,

    pub environment_deck: Vector<Environment>,
    pub item_deck: Vector<Item>,
    pub item_discard: Vector<Item>,

    pub skirmish: Option<Skirmish>,

    /// Next join slot; drives color assignment.
    pub next_color_slot: usize,

    pub ids: IdAllocator,
    pub rng: GameRng,
    pub action_history: Vector<ActionRecord>,
    pub created_at: DateTime<Utc>,
    /// Last committed change that produced events.
    pub updated_at: DateTime<Utc>,
}

impl GameState {
    /// Create a game in setup with a freshly dealt board.
    #[must_use]
    pub fn new(game_id: GameId, config: GameConfig) -> Self {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut ids = IdAllocator::new();

        let mut environment_deck = deck::environment_deck(&mut rng, &mut ids);
        let mut item_deck = deck::item_deck(&mut rng, &mut ids);
        let environments = deck::deal_board(
            config.initial_environments,
            &mut environment_deck,
            &mut item_deck,
            config.items_per_environment,
        );
        let prepared = environments
            .iter()
            .map(|e| (e.id(), OrdMap::new()))
            .collect();
        let now = Utc::now();

        Self {
            game_id,
            config,
            phase: Phase::Setup,
            turn: 0,
            players: Vector::new(),
            current_player_index: 0,
            environments,
            prepared,
            environment_deck,
            item_deck,
            item_discard: Vector::new(),
            skirmish: None,
            next_color_slot: 0,
            ids,
            rng,
            action_history: Vector::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // === Players ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        let index = self.player_index(id)?;
        self.players.get_mut(index)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn is_current(&self, id: &PlayerId) -> bool {
        self.current_player().is_some_and(|p| &p.id == id)
    }

    /// Seated player ids in seat order.
    #[must_use]
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Final results in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .map(|p| Standing {
                player_id: p.id.clone(),
                name: p.name.clone(),
                skirmishes_won: p.skirmishes_won,
            })
            .collect()
    }

    // === Board ===

    #[must_use]
    pub fn environment_index(&self, id: EnvironmentId) -> Option<usize> {
        self.environments.iter().position(|e| e.id() == id)
    }

    #[must_use]
    pub fn environment(&self, id: EnvironmentId) -> Option<&EnvironmentState> {
        self.environments.iter().find(|e| e.id() == id)
    }

    pub fn environment_mut(&mut self, id: EnvironmentId) -> Option<&mut EnvironmentState> {
        let index = self.environment_index(id)?;
        self.environments.get_mut(index)
    }

    #[must_use]
    pub fn active_environment_id(&self) -> Option<EnvironmentId> {
        self.skirmish.as_ref().map(|s| s.environment)
    }

    #[must_use]
    pub fn active_environment(&self) -> Option<&EnvironmentState> {
        self.environment(self.active_environment_id()?)
    }

    /// Total face-down cards prepared at an environment, all players combined.
    #[must_use]
    pub fn prepared_count(&self, environment: EnvironmentId) -> usize {
        self.prepared
            .get(&environment)
            .map_or(0, |by_player| by_player.values().map(Vector::len).sum())
    }

    /// A player's prepared cards at an environment.
    #[must_use]
    pub fn prepared_cards(&self, environment: EnvironmentId, player: &PlayerId) -> Vector<PlayerCard> {
        self.prepared
            .get(&environment)
            .and_then(|by_player| by_player.get(player))
            .cloned()
            .unwrap_or_default()
    }

    pub fn prepare(&mut self, environment: EnvironmentId, player: &PlayerId, card: PlayerCard) {
        self.prepared
            .entry(environment)
            .or_insert_with(OrdMap::new)
            .entry(player.clone())
            .or_insert_with(Vector::new)
            .push_back(card);
    }

    /// Drop a player's cards from every board zone.
    pub fn remove_from_board(&mut self, player: &PlayerId) {
        let environments: Vec<_> = self.prepared.keys().copied().collect();
        for environment in environments {
            if let Some(by_player) = self.prepared.get_mut(&environment) {
                by_player.remove(player);
            }
        }
        for environment in self.environments.iter_mut() {
            environment.cards_in_play.remove(player);
            if let Some(items) = environment.claimed_items.remove(player) {
                self.item_discard.append(items);
            }
        }
    }

    // === History ===

    /// Append an accepted action taken during `turn`.
    pub fn record(&mut self, action: Action, turn: u32) {
        let sequence = self.action_history.len() as u64;
        self.action_history
            .push_back(ActionRecord::new(action, turn, sequence));
    }
}
