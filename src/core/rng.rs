//! Seedable random number generation for deck shuffles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffles (tests, replays)
//! - **Entropy-seeded**: `from_entropy` for production play
//! - **Serializable**: O(1) state capture and restore, so a restored game
//!   continues the exact same random stream
//!
//! ```
//! use skirmish_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut deck_a = vec![1, 2, 3, 4, 5];
//! let mut deck_b = deck_a.clone();
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//! assert_eq!(deck_a, deck_b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game RNG backed by ChaCha8.
///
/// Serializes as its [`GameRngState`], which makes it safe to embed in
/// `GameState` without losing the stream position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    ///
    /// Uniform Fisher-Yates permutation (via `SliceRandom`).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(rng: &mut GameRng) -> Vec<u32> {
        let mut deck: Vec<u32> = (1..=24).collect();
        rng.shuffle(&mut deck);
        deck
    }

    #[test]
    fn test_same_seed_same_deck() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..5 {
            assert_eq!(deal(&mut a), deal(&mut b));
        }
    }

    #[test]
    fn test_seeds_diverge() {
        assert_ne!(deal(&mut GameRng::new(1)), deal(&mut GameRng::new(2)));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut deck = deal(&mut GameRng::new(42));
        assert_ne!(deck, (1..=24).collect::<Vec<_>>());
        deck.sort_unstable();
        assert_eq!(deck, (1..=24).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_covers_all_orderings() {
        // 3 elements have 6 orderings; a uniform shuffle hits every one.
        let mut rng = GameRng::new(7);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..600 {
            let mut hand = [1, 2, 3];
            rng.shuffle(&mut hand);
            seen.insert(hand);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_restore_continues_stream() {
        let mut rng = GameRng::new(42);
        deal(&mut rng);
        deal(&mut rng);

        let mut restored = GameRng::from_state(&rng.state());
        assert_eq!(deal(&mut rng), deal(&mut restored));
    }

    #[test]
    fn test_rng_serde_roundtrip() {
        let mut rng = GameRng::new(9);
        deal(&mut rng);

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();

        assert_eq!(rng, restored);
        assert_eq!(restored.seed(), 9);
        assert_eq!(deal(&mut rng), deal(&mut restored));
    }
}
