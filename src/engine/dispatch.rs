//! Action validation and handlers.
//!
//! Every handler checks, in order: phase, turn, payload references, domain
//! legality. Only then does it mutate. A handler that returns an error has
//! not touched the staged state.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::events::EventKind;
use super::Step;
use crate::cards::{deck, DiscardCost};
use crate::core::{
    Action, CardId, Command, EnvironmentId, ErrorCode, GameError, GameResult, ItemId, PassPolicy,
    Phase, Player, PlayerColor, PlayerId,
};
use crate::rules::{check_play, Legality, PlayContext};

impl Step<'_> {
    /// Route an action to its handler and record it on success.
    pub(crate) fn dispatch(&mut self, action: &Action) -> GameResult<()> {
        let player = &action.player;
        if self.state.player(player).is_none() {
            return Err(GameError::player_not_in_game());
        }

        let turn = self.state.turn;
        match &action.command {
            Command::ReadyUp => self.set_ready(player, true)?,
            Command::PrepareCard { card, environment } => {
                self.prepare_card(player, *card, *environment)?;
            }
            Command::InitiateSkirmish { environment } => {
                self.initiate_skirmish(player, *environment)?;
            }
            Command::PlayCard { card } => self.play_card(player, *card)?,
            Command::TakeItem { item, discarded } => self.take_item(player, *item, discarded)?,
            Command::Pass => self.pass(player)?,
            Command::DiscardToHandLimit { discarded } => {
                self.discard_to_hand_limit(player, discarded)?;
            }
        }

        debug!(
            game = %self.state.game_id,
            player = %player,
            action = %action.action_type(),
            turn,
            "action accepted"
        );
        self.state.record(action.clone(), turn);
        Ok(())
    }

    // === Guards ===

    fn require_phase(&self, phase: Phase, what: &str) -> GameResult<()> {
        if self.state.phase != phase {
            return Err(GameError::wrong_phase(format!(
                "{what} is only allowed during {phase} (game is in {})",
                self.state.phase
            )));
        }
        Ok(())
    }

    fn require_turn(&self, player: &PlayerId) -> GameResult<()> {
        if !self.state.is_current(player) {
            return Err(GameError::not_player_turn());
        }
        Ok(())
    }

    fn seated(&self, player: &PlayerId) -> GameResult<&Player> {
        self.state.player(player).ok_or_else(GameError::player_not_in_game)
    }

    fn require_not_passed(&self, player: &PlayerId) -> GameResult<()> {
        if self.seated(player)?.has_passed {
            return Err(GameError::invalid_move("You have already passed"));
        }
        Ok(())
    }

    fn require_environment(&self, environment: EnvironmentId) -> GameResult<()> {
        if self.state.environment(environment).is_none() {
            return Err(GameError::invalid_move(format!("{environment} is not on the board")));
        }
        Ok(())
    }

    fn require_in_hand(&self, player: &PlayerId, card: CardId) -> GameResult<()> {
        if !self.seated(player)?.holds(card) {
            return Err(GameError::invalid_move(format!("{card} is not in your hand")));
        }
        Ok(())
    }

    /// Every listed card is in hand, and none is listed twice.
    fn require_discards(&self, player: &PlayerId, cards: &[CardId]) -> GameResult<()> {
        let mut seen = FxHashSet::default();
        for &card in cards {
            if !seen.insert(card) {
                return Err(GameError::invalid_move(format!("{card} is listed more than once")));
            }
            self.require_in_hand(player, card)?;
        }
        Ok(())
    }

    fn active_environment(&self) -> GameResult<EnvironmentId> {
        self.state
            .active_environment_id()
            .ok_or_else(|| GameError::wrong_phase("No skirmish is in progress"))
    }

    // === Setup ===

    pub(crate) fn add_player(&mut self, id: PlayerId, name: String) -> GameResult<()> {
        self.require_phase(Phase::Setup, "Joining")?;
        if self.state.player_count() >= self.state.config.max_players {
            return Err(GameError::new(ErrorCode::GameFull, "Game is already full"));
        }
        if self.state.player(&id).is_some() {
            return Err(GameError::new(
                ErrorCode::PlayerNotInGame,
                "Player is already in the game",
            ));
        }
        let color = PlayerColor::for_slot(self.state.next_color_slot)
            .ok_or_else(|| GameError::new(ErrorCode::GameFull, "No player colors left"))?;

        self.state.next_color_slot += 1;
        let cards = deck::player_deck(&mut self.state.rng, &mut self.state.ids);
        let player = Player::new(id.clone(), name.clone(), color, cards);
        self.state.players.push_back(player);

        info!(game = %self.state.game_id, player = %id, ?color, "player joined");
        self.events.push(EventKind::PlayerJoined {
            player_id: id,
            name,
            color,
        });
        self.game_updated();
        Ok(())
    }

    pub(crate) fn remove_player(&mut self, id: &PlayerId) -> GameResult<()> {
        let index = self
            .state
            .player_index(id)
            .ok_or_else(GameError::player_not_in_game)?;
        let was_current = index == self.state.current_player_index;

        self.state.players.remove(index);
        self.state.remove_from_board(id);

        let remaining = self.state.player_count();
        if index < self.state.current_player_index {
            self.state.current_player_index -= 1;
        }
        if self.state.current_player_index >= remaining {
            self.state.current_player_index = 0;
        }

        info!(game = %self.state.game_id, player = %id, remaining, "player left");
        self.events.push(EventKind::PlayerLeft {
            player_id: id.clone(),
        });

        match self.state.phase {
            Phase::Setup => {
                if self.all_ready() {
                    self.start_handbuilding();
                } else {
                    self.game_updated();
                }
            }
            Phase::Finished => self.game_updated(),
            Phase::Handbuilding | Phase::Skirmish if remaining < 2 => self.end_game(),
            Phase::Handbuilding => self.game_updated(),
            Phase::Skirmish => {
                if self.skirmish_over() {
                    self.end_skirmish();
                } else {
                    if was_current || !self.current_in_skirmish() {
                        self.seat_next_eligible(0);
                    }
                    self.game_updated();
                }
            }
        }
        Ok(())
    }

    pub(crate) fn set_ready(&mut self, id: &PlayerId, ready: bool) -> GameResult<()> {
        self.require_phase(Phase::Setup, "Readying up")?;
        if let Some(player) = self.state.player_mut(id) {
            player.is_ready = ready;
        }

        if self.all_ready() {
            self.start_handbuilding();
        } else {
            self.game_updated();
        }
        Ok(())
    }

    pub(crate) fn set_connection(&mut self, id: &PlayerId, connected: bool) {
        let Some(player) = self.state.player_mut(id) else {
            return;
        };
        player.is_connected = connected;
        debug!(game = %self.state.game_id, player = %id, connected, "connection changed");
        self.game_updated();
    }

    fn all_ready(&self) -> bool {
        self.state.player_count() >= 2 && self.state.players.iter().all(|p| p.is_ready)
    }

    // === Handbuilding ===

    fn prepare_card(&mut self, player: &PlayerId, card: CardId, environment: EnvironmentId) -> GameResult<()> {
        self.require_phase(Phase::Handbuilding, "Preparing cards")?;
        self.require_turn(player)?;
        self.require_environment(environment)?;
        self.require_in_hand(player, card)?;

        let limit = self.state.config.handbuilding_hand_limit;
        let Some(seat) = self.state.player_mut(player) else {
            return Err(GameError::player_not_in_game());
        };
        let Some(prepared) = seat.take_from_hand(card) else {
            return Err(GameError::invalid_move(format!("{card} is not in your hand")));
        };
        if seat.hand.len() < limit {
            seat.draw(1);
        }
        self.state.prepare(environment, player, prepared);

        self.rule_for(environment)
            .on_prepare(&mut self.state, player, card, environment);

        self.events.push(EventKind::CardPrepared {
            player_id: player.clone(),
            environment_id: environment,
            prepared_count: self.state.prepared_count(environment),
        });
        self.next_turn();
        Ok(())
    }

    fn initiate_skirmish(&mut self, player: &PlayerId, environment: EnvironmentId) -> GameResult<()> {
        self.require_phase(Phase::Handbuilding, "Initiating a skirmish")?;
        self.require_turn(player)?;
        self.require_environment(environment)?;

        let threshold = self.state.config.skirmish_threshold;
        let prepared = self.state.prepared_count(environment);
        if prepared < threshold {
            return Err(GameError::new(
                ErrorCode::EnvironmentNotReady,
                format!("{environment} needs {threshold} prepared cards to skirmish, has {prepared}"),
            ));
        }

        self.start_skirmish(environment, player);
        Ok(())
    }

    // === Skirmish ===

    fn play_card(&mut self, player: &PlayerId, card: CardId) -> GameResult<()> {
        self.require_phase(Phase::Skirmish, "Playing cards")?;
        self.require_turn(player)?;
        self.require_not_passed(player)?;
        self.require_in_hand(player, card)?;
        let environment = self.active_environment()?;

        let players = self.state.player_ids();
        let seat = self.seated(player)?;
        let Some(board) = self.state.environment(environment) else {
            return Err(GameError::wrong_phase("No skirmish is in progress"));
        };
        let Some(played) = seat.hand.iter().find(|c| c.id == card) else {
            return Err(GameError::invalid_move(format!("{card} is not in your hand")));
        };
        let ctx = PlayContext {
            card: played,
            player,
            environment: board,
            players: &players,
        };
        if let Legality::Forbidden(reason) = check_play(&ctx, self.rules) {
            return Err(GameError::new(ErrorCode::CannotPlayCard, reason));
        }

        let Some(played) = self.state.player_mut(player).and_then(|p| p.take_from_hand(card)) else {
            return Err(GameError::invalid_move(format!("{card} is not in your hand")));
        };
        if let Some(board) = self.state.environment_mut(environment) {
            board.put_in_play(player, played.clone());
        }

        self.rule_for(environment)
            .on_card_play(&mut self.state, player, card, environment);

        self.events.push(EventKind::CardPlayed {
            player_id: player.clone(),
            card: played,
            environment_id: environment,
        });
        self.after_skirmish_action();
        Ok(())
    }

    fn take_item(&mut self, player: &PlayerId, item: ItemId, discarded: &[CardId]) -> GameResult<()> {
        self.require_phase(Phase::Skirmish, "Taking items")?;
        self.require_turn(player)?;
        self.require_not_passed(player)?;
        if self.seated(player)?.hand.is_empty() {
            return Err(GameError::new(
                ErrorCode::InsufficientCards,
                "Must have at least 1 card in hand to take an item",
            ));
        }

        let environment = self.active_environment()?;
        let Some((index, cost)) = self
            .state
            .environment(environment)
            .and_then(|e| e.item_index(item).map(|i| (i, e.items[i].discard_cost)))
        else {
            return Err(GameError::new(ErrorCode::ItemNotAvailable, format!("{item} is not available here")));
        };

        if let DiscardCost::Fixed(cost) = cost {
            let cost = cost as usize;
            if discarded.len() < cost {
                return Err(GameError::new(
                    ErrorCode::InsufficientCards,
                    format!("Must discard {cost} cards to take this item"),
                ));
            }
            if discarded.len() > cost {
                return Err(GameError::invalid_move(format!(
                    "This item costs {cost} cards, {} were listed",
                    discarded.len()
                )));
            }
        }
        self.require_discards(player, discarded)?;

        if let Some(seat) = self.state.player_mut(player) {
            seat.discard_from_hand(discarded);
        }
        let Some(board) = self.state.environment_mut(environment) else {
            return Err(GameError::wrong_phase("No skirmish is in progress"));
        };
        let taken = board.items.remove(index);
        board
            .claimed_items
            .entry(player.clone())
            .or_insert_with(im::Vector::new)
            .push_back(taken.clone());

        self.events.push(EventKind::ItemTaken {
            player_id: player.clone(),
            item: taken,
            environment_id: environment,
            discarded_card_ids: discarded.to_vec(),
        });
        self.after_skirmish_action();
        Ok(())
    }

    fn pass(&mut self, player: &PlayerId) -> GameResult<()> {
        self.require_phase(Phase::Skirmish, "Passing")?;
        self.require_turn(player)?;
        self.require_not_passed(player)?;
        let environment = self.active_environment()?;

        let policy = self
            .rule_for(environment)
            .on_pass(self.state.config.pass_policy);
        let targets: Vec<EnvironmentId> = self
            .state
            .environments
            .iter()
            .map(|e| e.id())
            .filter(|&id| id != environment)
            .collect();

        let Some(seat) = self.state.player_mut(player) else {
            return Err(GameError::player_not_in_game());
        };
        seat.has_passed = true;

        match policy {
            PassPolicy::PrepareElsewhere if !targets.is_empty() => {
                let hand = std::mem::take(&mut seat.hand);
                for (i, card) in hand.into_iter().enumerate() {
                    self.state.prepare(targets[i % targets.len()], player, card);
                }
            }
            _ => {
                seat.discard_hand();
            }
        }

        debug!(game = %self.state.game_id, player = %player, ?policy, "player passed");
        self.events.push(EventKind::PlayerPassed {
            player_id: player.clone(),
        });
        self.after_skirmish_action();
        Ok(())
    }

    // === Any phase with a hand limit ===

    fn discard_to_hand_limit(&mut self, player: &PlayerId, discarded: &[CardId]) -> GameResult<()> {
        let limit = match self.state.phase {
            Phase::Handbuilding => self.state.config.handbuilding_hand_limit,
            Phase::Skirmish => self.state.config.skirmish_hand_limit,
            phase => {
                return Err(GameError::wrong_phase(format!(
                    "Discarding to the hand limit is not allowed during {phase}"
                )))
            }
        };
        self.require_discards(player, discarded)?;

        let remaining = self.seated(player)?.hand.len() - discarded.len();
        if remaining > limit {
            return Err(GameError::new(
                ErrorCode::HandLimitExceeded,
                format!("Hand would still hold {remaining} cards, limit is {limit}"),
            ));
        }

        if let Some(seat) = self.state.player_mut(player) {
            seat.discard_from_hand(discarded);
        }
        self.game_updated();
        Ok(())
    }
}
