//! Per-environment rules.
//!
//! Each environment title may have one [`EnvironmentRule`] registered in a
//! [`RuleBook`]. The engine consults the rule for the environment involved at
//! fixed hook points:
//!
//! - `check_play`: before a card is played during a skirmish
//! - `on_prepare`: after a card is prepared here
//! - `on_skirmish_start`: after a skirmish here has been set up
//! - `on_card_play`: after a card is put into play here
//! - `on_pass`: to choose what happens to a passing player's hand
//! - `on_skirmish_end`: after scoring, before the board is cleared
//!
//! Every hook defaults to a no-op, and unregistered titles get a permissive
//! default rule, so adding an environment means registering one more rule.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::legality::{Legality, PlayContext};
use super::power::has_acolyte_majority;
use crate::cards::CardType;
use crate::core::{CardId, EnvironmentId, GameState, PassPolicy, PlayerId};

/// Behavior attached to one environment title.
pub trait EnvironmentRule: Send + Sync {
    /// Title this rule is registered under.
    fn title(&self) -> &str;

    fn check_play(&self, _ctx: &PlayContext<'_>) -> Legality {
        Legality::Allowed
    }

    fn on_prepare(
        &self,
        _state: &mut GameState,
        _player: &PlayerId,
        _card: CardId,
        _environment: EnvironmentId,
    ) {
    }

    fn on_skirmish_start(&self, _state: &mut GameState, _environment: EnvironmentId) {}

    fn on_card_play(
        &self,
        _state: &mut GameState,
        _player: &PlayerId,
        _card: CardId,
        _environment: EnvironmentId,
    ) {
    }

    /// Pass policy to apply here, given the configured one.
    fn on_pass(&self, policy: PassPolicy) -> PassPolicy {
        policy
    }

    fn on_skirmish_end(&self, _state: &mut GameState, _environment: EnvironmentId) {}
}

/// Rule used for titles with nothing registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Permissive;

impl EnvironmentRule for Permissive {
    fn title(&self) -> &str {
        ""
    }
}

/// You cannot play Fire cards here.
#[derive(Clone, Copy, Debug, Default)]
pub struct Badlands;

impl EnvironmentRule for Badlands {
    fn title(&self) -> &str {
        "Badlands"
    }

    fn check_play(&self, ctx: &PlayContext<'_>) -> Legality {
        if ctx.card.is(CardType::Fire) {
            return Legality::forbidden("Fire cards cannot be played in the Badlands");
        }
        Legality::Allowed
    }
}

/// You cannot play Water cards here.
#[derive(Clone, Copy, Debug, Default)]
pub struct Desert;

impl EnvironmentRule for Desert {
    fn title(&self) -> &str {
        "Desert"
    }

    fn check_play(&self, ctx: &PlayContext<'_>) -> Legality {
        if ctx.card.is(CardType::Water) {
            return Legality::forbidden("Water cards cannot be played in the Desert");
        }
        Legality::Allowed
    }
}

/// Water, Fire, and Electric need an Acolyte majority.
#[derive(Clone, Copy, Debug, Default)]
pub struct HallowedGround;

impl EnvironmentRule for HallowedGround {
    fn title(&self) -> &str {
        "Hallowed Ground"
    }

    fn check_play(&self, ctx: &PlayContext<'_>) -> Legality {
        let elemental = [CardType::Water, CardType::Fire, CardType::Electric]
            .into_iter()
            .any(|t| ctx.card.is(t));
        if elemental && !has_acolyte_majority(ctx.environment, ctx.player, ctx.players) {
            return Legality::forbidden(
                "Water, Fire, and Electric cards need more Acolytes in play than every opponent",
            );
        }
        Legality::Allowed
    }
}

/// Passing always discards the remaining hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct Volcano;

impl EnvironmentRule for Volcano {
    fn title(&self) -> &str {
        "Volcano"
    }

    fn on_pass(&self, _policy: PassPolicy) -> PassPolicy {
        PassPolicy::DiscardHand
    }
}

/// Acolytes in discard piles rise into play when a skirmish starts here.
#[derive(Clone, Copy, Debug, Default)]
pub struct Graveyard;

impl EnvironmentRule for Graveyard {
    fn title(&self) -> &str {
        "Graveyard"
    }

    fn on_skirmish_start(&self, state: &mut GameState, environment: EnvironmentId) {
        let Some(env_index) = state.environment_index(environment) else {
            return;
        };
        for index in 0..state.players.len() {
            let Some(player) = state.players.get_mut(index) else {
                continue;
            };
            let (risen, rest) = player
                .discard
                .iter()
                .cloned()
                .partition::<Vec<_>, _>(|c| c.is(CardType::Acolyte));
            if risen.is_empty() {
                continue;
            }
            player.discard = rest.into_iter().collect();
            let id = player.id.clone();

            tracing::debug!(player = %id, count = risen.len(), "acolytes rise from the graveyard");
            if let Some(env) = state.environments.get_mut(env_index) {
                for card in risen {
                    env.put_in_play(&id, card);
                }
            }
        }
    }
}

/// Lookup table from environment title to rule.
#[derive(Clone)]
pub struct RuleBook {
    rules: FxHashMap<String, Arc<dyn EnvironmentRule>>,
    fallback: Arc<dyn EnvironmentRule>,
}

impl RuleBook {
    /// A rule book with nothing registered; every environment is permissive.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
            fallback: Arc::new(Permissive),
        }
    }

    /// The built-in rules.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(Badlands)
            .with_rule(Desert)
            .with_rule(HallowedGround)
            .with_rule(Volcano)
            .with_rule(Graveyard)
    }

    /// Register a rule, replacing any rule with the same title.
    pub fn register(&mut self, rule: impl EnvironmentRule + 'static) {
        self.rules.insert(rule.title().to_string(), Arc::new(rule));
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl EnvironmentRule + 'static) -> Self {
        self.register(rule);
        self
    }

    /// Rule for a title, or the permissive default.
    #[must_use]
    pub fn get(&self, title: &str) -> &dyn EnvironmentRule {
        self.rules.get(title).unwrap_or(&self.fallback).as_ref()
    }

    /// Rule applied to unregistered titles.
    #[must_use]
    pub fn fallback(&self) -> &dyn EnvironmentRule {
        self.fallback.as_ref()
    }

    #[must_use]
    pub fn is_registered(&self, title: &str) -> bool {
        self.rules.contains_key(title)
    }

    /// Registered titles, sorted.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<_> = self.rules.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBook")
            .field("titles", &self.titles())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Environment, PlayerCard, Power};
    use crate::core::{EnvironmentState, GameConfig, GameId};

    fn card(id: u32, card_type: CardType) -> PlayerCard {
        PlayerCard {
            id: CardId(id),
            title: card_type.name().to_string(),
            card_type,
            power: Power::Fixed(1),
            effect: String::new(),
            image: String::new(),
        }
    }

    fn board(title: &str) -> EnvironmentState {
        EnvironmentState::new(Environment {
            id: EnvironmentId(70),
            title: title.to_string(),
            description: String::new(),
            image: String::new(),
        })
    }

    fn check(rules: &RuleBook, env: &EnvironmentState, player: &PlayerId, card: &PlayerCard) -> Legality {
        let players = [PlayerId::from("p1"), PlayerId::from("p2")];
        let ctx = PlayContext {
            card,
            player,
            environment: env,
            players: &players,
        };
        rules.get(env.title()).check_play(&ctx)
    }

    #[test]
    fn test_standard_titles() {
        let rules = RuleBook::standard();
        assert_eq!(
            rules.titles(),
            vec!["Badlands", "Desert", "Graveyard", "Hallowed Ground", "Volcano"]
        );
        assert!(!rules.is_registered("Oasis"));
    }

    #[test]
    fn test_badlands_and_desert() {
        let rules = RuleBook::standard();
        let p1 = PlayerId::from("p1");

        let badlands = board("Badlands");
        assert!(!check(&rules, &badlands, &p1, &card(1, CardType::Fire)).is_allowed());
        assert!(check(&rules, &badlands, &p1, &card(2, CardType::Water)).is_allowed());

        let desert = board("Desert");
        assert!(!check(&rules, &desert, &p1, &card(3, CardType::Water)).is_allowed());
        assert!(check(&rules, &desert, &p1, &card(4, CardType::Fire)).is_allowed());
    }

    #[test]
    fn test_hallowed_ground_needs_majority() {
        let rules = RuleBook::standard();
        let p1 = PlayerId::from("p1");
        let p2 = PlayerId::from("p2");
        let mut env = board("Hallowed Ground");
        let spark = card(1, CardType::Electric);

        assert!(!check(&rules, &env, &p1, &spark).is_allowed());
        assert!(check(&rules, &env, &p1, &card(9, CardType::Colossus)).is_allowed());

        env.put_in_play(&p1, card(2, CardType::Acolyte));
        assert!(check(&rules, &env, &p1, &spark).is_allowed());

        env.put_in_play(&p2, card(3, CardType::Acolyte));
        assert!(!check(&rules, &env, &p1, &spark).is_allowed());
    }

    #[test]
    fn test_unregistered_is_permissive() {
        let rules = RuleBook::empty();
        let p1 = PlayerId::from("p1");
        let badlands = board("Badlands");
        assert!(check(&rules, &badlands, &p1, &card(1, CardType::Fire)).is_allowed());
    }

    #[test]
    fn test_volcano_forces_discard() {
        let rules = RuleBook::standard();
        assert_eq!(
            rules.get("Volcano").on_pass(PassPolicy::PrepareElsewhere),
            PassPolicy::DiscardHand
        );
        assert_eq!(
            rules.get("Oasis").on_pass(PassPolicy::PrepareElsewhere),
            PassPolicy::PrepareElsewhere
        );
    }

    #[test]
    fn test_graveyard_raises_acolytes() {
        let mut state = GameState::new(GameId::from("g"), GameConfig::new().with_seed(1));
        let env = state.environments[0].id();
        let p1 = PlayerId::from("p1");
        let mut player = crate::core::Player::new(
            p1.clone(),
            "Alice",
            crate::core::PlayerColor::Black,
            im::Vector::new(),
        );
        player.discard.push_back(card(1, CardType::Acolyte));
        player.discard.push_back(card(2, CardType::Fire));
        player.discard.push_back(card(3, CardType::Acolyte));
        state.players.push_back(player);

        Graveyard.on_skirmish_start(&mut state, env);

        let risen: Vec<_> = state.environments[0].in_play(&p1).map(|c| c.id).collect();
        assert_eq!(risen, vec![CardId(1), CardId(3)]);
        assert_eq!(state.players[0].discard.len(), 1);
    }
}
