//! Game configuration.
//!
//! A `GameConfig` is fixed when the game is created and travels inside
//! `GameState`, so a restored game needs nothing but its state.

use serde::{Deserialize, Serialize};

/// Number of distinct player colors; also the hard player cap.
pub const MAX_PLAYERS: usize = 4;

/// Match length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameLength {
    /// First to 2 skirmish wins.
    Quick,
    /// First to 3 skirmish wins.
    #[default]
    Standard,
}

impl GameLength {
    /// Skirmish wins needed to finish the game.
    #[must_use]
    pub const fn target_skirmishes(self) -> u32 {
        match self {
            GameLength::Quick => 2,
            GameLength::Standard => 3,
        }
    }
}

/// What happens to the cards left in a player's hand when they pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassPolicy {
    /// Remaining hand goes to the discard pile.
    #[default]
    DiscardHand,
    /// Remaining hand is dealt face-down, round-robin, onto the
    /// environments that are not hosting the skirmish.
    PrepareElsewhere,
}

/// Complete game configuration.
///
/// ```
/// use skirmish_engine::core::{GameConfig, GameLength, PassPolicy};
///
/// let config = GameConfig::new()
///     .with_max_players(3)
///     .with_length(GameLength::Quick)
///     .with_pass_policy(PassPolicy::PrepareElsewhere)
///     .with_seed(42);
///
/// assert_eq!(config.target_skirmishes(), 2);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats available (2..=4).
    pub max_players: usize,

    /// Match length.
    pub length: GameLength,

    /// Cards drawn when handbuilding starts.
    pub starting_hand: usize,

    /// Hand size maintained during handbuilding.
    pub handbuilding_hand_limit: usize,

    /// Maximum hand size during a skirmish.
    pub skirmish_hand_limit: usize,

    /// Prepared cards (all players combined) needed to initiate a skirmish.
    pub skirmish_threshold: usize,

    /// Environments face-up on the board.
    pub initial_environments: usize,

    /// Items seeded onto each fresh environment.
    pub items_per_environment: usize,

    /// Handling of a passing player's remaining hand.
    pub pass_policy: PassPolicy,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            length: GameLength::Standard,
            starting_hand: 3,
            handbuilding_hand_limit: 3,
            skirmish_hand_limit: 10,
            skirmish_threshold: 8,
            initial_environments: 3,
            items_per_environment: 1,
            pass_policy: PassPolicy::DiscardHand,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seat count.
    ///
    /// Panics outside `2..=4`: there are only four player colors.
    #[must_use]
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        assert!(
            (2..=MAX_PLAYERS).contains(&max_players),
            "Player count must be 2-{MAX_PLAYERS}"
        );
        self.max_players = max_players;
        self
    }

    /// Set the match length.
    #[must_use]
    pub fn with_length(mut self, length: GameLength) -> Self {
        self.length = length;
        self
    }

    /// Set the pass policy.
    #[must_use]
    pub fn with_pass_policy(mut self, policy: PassPolicy) -> Self {
        self.pass_policy = policy;
        self
    }

    /// Set the prepared-card threshold for initiating a skirmish.
    #[must_use]
    pub fn with_skirmish_threshold(mut self, threshold: usize) -> Self {
        self.skirmish_threshold = threshold;
        self
    }

    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Skirmish wins needed to finish the game.
    #[must_use]
    pub fn target_skirmishes(&self) -> u32 {
        self.length.target_skirmishes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.max_players, 4);
        assert_eq!(config.target_skirmishes(), 3);
        assert_eq!(config.starting_hand, 3);
        assert_eq!(config.skirmish_hand_limit, 10);
        assert_eq!(config.skirmish_threshold, 8);
        assert_eq!(config.pass_policy, PassPolicy::DiscardHand);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_quick_game() {
        let config = GameConfig::new().with_length(GameLength::Quick);
        assert_eq!(config.target_skirmishes(), 2);
    }

    #[test]
    #[should_panic(expected = "Player count must be 2-4")]
    fn test_too_many_players() {
        let _ = GameConfig::new().with_max_players(5);
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new()
            .with_pass_policy(PassPolicy::PrepareElsewhere)
            .with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"prepare_elsewhere\""));

        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
