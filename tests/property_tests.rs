//! Property tests for scoring and for the engine under random action streams.
//!
//! Invariants checked:
//! 1. Effective power is never negative, whatever the board holds
//! 2. A declared skirmish winner strictly beats every other player
//! 3. A rejected action leaves the state untouched
//! 4. The current player index always points at a seated player
//! 5. Every seated player's 24 cards stay accounted for across all zones

use proptest::prelude::*;
use skirmish_engine::cards::{CardType, Environment, PlayerCard, Power};
use skirmish_engine::core::{
    Action, CardId, EnvironmentId, EnvironmentState, GameConfig, GameState, ItemId, PassPolicy,
    Phase, PlayerId,
};
use skirmish_engine::engine::Engine;
use skirmish_engine::rules::{determine_winner, effective_power, score_environment, PowerContext};

const PLAYERS: [&str; 4] = ["p1", "p2", "p3", "p4"];

fn board_strategy() -> impl Strategy<Value = Vec<(usize, usize, i32)>> {
    prop::collection::vec((0usize..4, 0usize..CardType::ALL.len(), -3i32..9), 0..30)
}

fn build_board(cards: &[(usize, usize, i32)]) -> (EnvironmentState, Vec<PlayerId>) {
    let mut env = EnvironmentState::new(Environment {
        id: EnvironmentId::new(1),
        title: "Oasis".into(),
        description: String::new(),
        image: String::new(),
    });
    for (i, &(owner, card_type, power)) in cards.iter().enumerate() {
        let card_type = CardType::ALL[card_type];
        env.put_in_play(
            &PlayerId::from(PLAYERS[owner]),
            PlayerCard {
                id: CardId::new(100 + i as u32),
                title: card_type.name().to_string(),
                card_type,
                power: Power::Fixed(power),
                effect: String::new(),
                image: String::new(),
            },
        );
    }
    let players = PLAYERS.iter().map(|&id| PlayerId::from(id)).collect();
    (env, players)
}

/// Cards a player owns across every zone.
fn cards_owned(state: &GameState, player: &PlayerId) -> usize {
    let Some(seat) = state.player(player) else {
        return 0;
    };
    let prepared: usize = state
        .prepared
        .values()
        .filter_map(|by_player| by_player.get(player))
        .map(|cards| cards.len())
        .sum();
    let in_play: usize = state
        .environments
        .iter()
        .map(|env| env.in_play_count(player))
        .sum();
    seat.hand.len() + seat.deck.len() + seat.discard.len() + prepared + in_play
}

/// Turn a random triple into an action against the current state.
fn pick_action(state: &GameState, (kind, a, b): (u8, u8, u8)) -> Option<Action> {
    let count = state.player_count();
    if count == 0 {
        return None;
    }
    let actor = if b % 5 == 0 {
        state.players[a as usize % count].clone()
    } else {
        state.current_player()?.clone()
    };
    let id = actor.id.clone();
    let hand: Vec<CardId> = actor.hand.iter().map(|c| c.id).collect();
    let some_card = hand
        .get(a as usize % hand.len().max(1))
        .copied()
        .unwrap_or(CardId::new(0));
    let environment = state.environments[b as usize % state.environments.len()].id();

    let action = match kind % 7 {
        0 => Action::prepare_card(id, some_card, environment),
        1 => Action::initiate_skirmish(id, environment),
        2 => Action::play_card(id, some_card),
        3 => {
            let item = state
                .active_environment()
                .and_then(|env| env.items.front())
                .map_or(ItemId::new(0), |item| item.id);
            let take = (a as usize % 3).min(hand.len());
            Action::take_item(id, item, &hand[..take])
        }
        4 => Action::pass(id),
        5 => Action::discard_to_hand_limit(id, &hand[..hand.len().min(a as usize % 2)]),
        _ => Action::ready_up(id),
    };
    Some(action)
}

fn check_invariants(state: &GameState) -> Result<(), TestCaseError> {
    let count = state.player_count();
    if count > 0 {
        prop_assert!(state.current_player_index < count);
    }
    for player in state.players.iter() {
        prop_assert_eq!(cards_owned(state, &player.id), 24);
        match state.phase {
            Phase::Handbuilding => {
                prop_assert!(player.hand.len() <= state.config.handbuilding_hand_limit);
            }
            Phase::Skirmish => {
                prop_assert!(player.hand.len() <= state.config.skirmish_hand_limit);
            }
            _ => {}
        }
        prop_assert!(player.skirmishes_won <= state.config.target_skirmishes());
    }
    prop_assert_eq!(state.phase == Phase::Skirmish, state.skirmish.is_some());
    if let Some(skirmish) = &state.skirmish {
        prop_assert!(state.environment(skirmish.environment).is_some());
    }
    prop_assert_eq!(state.environments.len(), state.config.initial_environments);
    Ok(())
}

proptest! {
    #[test]
    fn prop_effective_power_non_negative(cards in board_strategy()) {
        let (env, players) = build_board(&cards);
        for owner in &players {
            let ctx = PowerContext::new(&env, owner, &players);
            for card in env.in_play(owner) {
                prop_assert!(effective_power(card, &ctx) >= 0);
            }
        }
    }

    #[test]
    fn prop_winner_beats_everyone(cards in board_strategy()) {
        let (env, players) = build_board(&cards);
        let scores = score_environment(&env, &players);
        let winners = scores.iter().filter(|s| s.is_winner).count();
        prop_assert!(winners <= 1);

        match determine_winner(&scores) {
            Some(index) => {
                let best = &scores[index];
                prop_assert!(best.is_winner);
                for (i, other) in scores.iter().enumerate() {
                    if i != index {
                        prop_assert!(
                            (best.total_power, best.card_count) > (other.total_power, other.card_count)
                        );
                    }
                }
            }
            None => {
                prop_assert_eq!(winners, 0);
            }
        }
    }

    #[test]
    fn prop_random_actions_keep_invariants(
        seed in any::<u64>(),
        seats in 2usize..=4,
        threshold in 2usize..=8,
        prepare_elsewhere in any::<bool>(),
        ops in prop::collection::vec((any::<u8>(), any::<u8>(), any::<u8>()), 0..150),
    ) {
        let policy = if prepare_elsewhere {
            PassPolicy::PrepareElsewhere
        } else {
            PassPolicy::DiscardHand
        };
        let config = GameConfig::new()
            .with_seed(seed)
            .with_skirmish_threshold(threshold)
            .with_pass_policy(policy);

        let mut engine = Engine::with_game_id("prop", config);
        for id in &PLAYERS[..seats] {
            engine.add_player(*id, *id).unwrap();
        }
        for id in &PLAYERS[..seats] {
            engine.process(&Action::ready_up(*id)).unwrap();
        }
        check_invariants(engine.state())?;

        for op in ops {
            let Some(action) = pick_action(engine.state(), op) else {
                break;
            };
            let before = engine.snapshot();
            match engine.process(&action) {
                Ok(events) => {
                    prop_assert!(!events.is_empty());
                    if before.phase != Phase::Finished && engine.phase() == Phase::Finished {
                        prop_assert_eq!(events.last().map(|e| e.name()), Some("GAME_ENDED"));
                    }
                }
                Err(_) => {
                    prop_assert_eq!(&engine.snapshot(), &before);
                }
            }
            check_invariants(engine.state())?;
        }
    }
}
