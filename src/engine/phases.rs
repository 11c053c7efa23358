//! Phase transitions and turn order.
//!
//! ```text
//! setup -> handbuilding <-> skirmish -> ... -> finished
//! ```
//!
//! Transitions push `PHASE_CHANGED` before the `GAME_UPDATED` that closes
//! the step, and a finished game ends with `GAME_ENDED`.

use im::OrdMap;
use tracing::{debug, info};

use super::events::EventKind;
use super::Step;
use crate::cards::deck;
use crate::core::{EnvironmentId, EnvironmentState, Phase, PlayerId, Skirmish};
use crate::rules::{score_environment, EnvironmentRule, RuleBook};

impl<'a> Step<'a> {
    /// The rule registered for an environment on the board.
    pub(crate) fn rule_for(&self, environment: EnvironmentId) -> &'a dyn EnvironmentRule {
        let rules: &'a RuleBook = self.rules;
        match self.state.environment(environment) {
            Some(env) => rules.get(env.title()),
            None => rules.fallback(),
        }
    }

    pub(crate) fn game_updated(&mut self) {
        self.events.push(EventKind::GameUpdated {
            phase: self.state.phase,
            turn: self.state.turn,
            current_player_id: self.state.current_player().map(|p| p.id.clone()),
        });
    }

    fn change_phase(&mut self, to: Phase) {
        let from = self.state.phase;
        self.state.phase = to;
        debug!(game = %self.state.game_id, %from, %to, "phase changed");
        self.events.push(EventKind::PhaseChanged { from, to });
    }

    // === Turn order ===

    /// Advance the turn counter and hand the turn on.
    ///
    /// During a skirmish the turn skips players who have passed or hold no
    /// cards.
    pub(crate) fn next_turn(&mut self) {
        self.state.turn += 1;
        match self.state.phase {
            Phase::Skirmish => self.seat_next_eligible(1),
            _ => {
                let count = self.state.player_count();
                if count > 0 {
                    self.state.current_player_index = (self.state.current_player_index + 1) % count;
                }
            }
        }
        self.game_updated();
    }

    /// Move the turn to the first player still in the skirmish, looking
    /// `start` seats past the current one and wrapping around.
    pub(crate) fn seat_next_eligible(&mut self, start: usize) {
        let count = self.state.player_count();
        let current = self.state.current_player_index;
        let next = (start..start + count)
            .map(|offset| (current + offset) % count)
            .find(|&i| self.state.players.get(i).is_some_and(|p| p.in_skirmish()));
        if let Some(index) = next {
            self.state.current_player_index = index;
        }
    }

    pub(crate) fn current_in_skirmish(&self) -> bool {
        self.state.current_player().is_some_and(|p| p.in_skirmish())
    }

    /// Every player has passed or run out of cards.
    pub(crate) fn skirmish_over(&self) -> bool {
        self.state.players.iter().all(|p| !p.in_skirmish())
    }

    pub(crate) fn after_skirmish_action(&mut self) {
        if self.skirmish_over() {
            self.end_skirmish();
        } else {
            self.next_turn();
        }
    }

    // === Transitions ===

    pub(crate) fn start_handbuilding(&mut self) {
        let hand = self.state.config.starting_hand;
        for player in self.state.players.iter_mut() {
            player.draw_to(hand);
            player.has_passed = false;
        }
        self.state.turn = 1;
        self.state.current_player_index = 0;

        info!(game = %self.state.game_id, players = self.state.player_count(), "game started");
        self.change_phase(Phase::Handbuilding);
        self.game_updated();
    }

    /// Gather the prepared cards at `environment` into hands and hand the
    /// turn to the initiator.
    pub(crate) fn start_skirmish(&mut self, environment: EnvironmentId, initiator: &PlayerId) {
        let limit = self.state.config.skirmish_hand_limit;
        let gathered = self
            .state
            .prepared
            .insert(environment, OrdMap::new())
            .unwrap_or_default();

        for player in self.state.players.iter_mut() {
            if let Some(cards) = gathered.get(&player.id) {
                player.hand.append(cards.clone());
            }
            player.trim_hand(limit);
            player.has_passed = false;
        }

        if let Some(index) = self.state.player_index(initiator) {
            self.state.current_player_index = index;
        }
        self.state.skirmish = Some(Skirmish {
            environment,
            initiator: initiator.clone(),
        });

        debug!(game = %self.state.game_id, %environment, %initiator, "skirmish initiated");
        self.events.push(EventKind::SkirmishInitiated {
            environment_id: environment,
            initiator_id: initiator.clone(),
        });
        self.change_phase(Phase::Skirmish);

        self.rule_for(environment)
            .on_skirmish_start(&mut self.state, environment);

        if self.skirmish_over() {
            self.end_skirmish();
        } else if !self.current_in_skirmish() {
            self.next_turn();
        } else {
            self.game_updated();
        }
    }

    /// Score the skirmish, clear its environment, and either start the
    /// next round or finish the game.
    pub(crate) fn end_skirmish(&mut self) {
        let Some(skirmish) = self.state.skirmish.take() else {
            return;
        };
        let environment = skirmish.environment;

        let players = self.state.player_ids();
        let scores = self
            .state
            .environment(environment)
            .map(|env| score_environment(env, &players))
            .unwrap_or_default();
        let winner = scores
            .iter()
            .find(|s| s.is_winner)
            .map(|s| s.player_id.clone());

        let mut target_reached = false;
        if let Some(id) = &winner {
            let target = self.state.config.target_skirmishes();
            if let Some(player) = self.state.player_mut(id) {
                player.skirmishes_won += 1;
                target_reached = player.skirmishes_won >= target;
            }
        }
        info!(
            game = %self.state.game_id,
            %environment,
            winner = winner.as_ref().map_or("none", PlayerId::as_str),
            "skirmish ended"
        );

        self.rule_for(environment)
            .on_skirmish_end(&mut self.state, environment);
        self.retire_environment(environment);
        for player in self.state.players.iter_mut() {
            player.has_passed = false;
        }

        self.events.push(EventKind::SkirmishEnded {
            environment_id: environment,
            scores,
            winner_id: winner,
        });

        if target_reached {
            self.end_game();
        } else {
            self.start_next_round();
        }
    }

    /// Send a scored environment's cards and items to the discard piles and
    /// put a fresh environment in its slot.
    ///
    /// With the environment deck exhausted the old environment stays, cleared
    /// and restocked with items.
    fn retire_environment(&mut self, environment: EnvironmentId) {
        let Some(index) = self.state.environment_index(environment) else {
            return;
        };
        let old = self.state.environments[index].clone();
        self.clear_environment(environment);
        self.state.item_discard.append(old.items);

        let items_each = self.state.config.items_per_environment;
        let fresh = deck::deal_environment(
            &mut self.state.environment_deck,
            &mut self.state.item_deck,
            items_each,
        );
        let replacement = match fresh {
            Some(fresh) => {
                self.state.prepared.remove(&environment);
                self.state.prepared.insert(fresh.id(), OrdMap::new());
                debug!(game = %self.state.game_id, retired = %environment, drawn = %fresh.id(), "environment replaced");
                fresh
            }
            None => {
                let mut same = EnvironmentState::new(old.environment);
                same.items = deck::draw_items(&mut self.state.item_deck, items_each);
                same
            }
        };
        self.state.environments.set(index, replacement);
    }

    /// Move the cards in play to their owners' discard piles and claimed
    /// items to the item discard. Unclaimed items stay.
    fn clear_environment(&mut self, environment: EnvironmentId) {
        let Some(board) = self.state.environment_mut(environment) else {
            return;
        };
        let in_play = std::mem::take(&mut board.cards_in_play);
        let claimed = std::mem::take(&mut board.claimed_items);

        for (owner, cards) in in_play {
            if let Some(player) = self.state.player_mut(&owner) {
                player.discard.append(cards);
            }
        }
        for (_, items) in claimed {
            self.state.item_discard.append(items);
        }
    }

    fn start_next_round(&mut self) {
        let hand = self.state.config.handbuilding_hand_limit;
        for player in self.state.players.iter_mut() {
            player.draw_to(hand);
        }
        self.change_phase(Phase::Handbuilding);
        self.next_turn();
    }

    pub(crate) fn end_game(&mut self) {
        if let Some(skirmish) = self.state.skirmish.take() {
            self.clear_environment(skirmish.environment);
        }
        self.change_phase(Phase::Finished);
        self.game_updated();

        let standings = self.state.standings();
        info!(game = %self.state.game_id, ?standings, "game ended");
        self.events.push(EventKind::GameEnded { standings });
    }
}
