//! Skirmish scoring.
//!
//! Each player's score is the summed effective power of their cards in play
//! at the skirmish environment. The highest score wins; a tie on score goes
//! to whoever has more cards in play; a tie on both means nobody wins.

use serde::{Deserialize, Serialize};

use super::power::{total_power, PowerContext};
use crate::core::{EnvironmentState, PlayerId};

/// One player's result for a skirmish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub player_id: PlayerId,
    pub total_power: i32,
    pub card_count: usize,
    pub is_winner: bool,
}

/// Score every seated player at an environment, in seat order.
///
/// Winner flags are already set.
#[must_use]
pub fn score_environment(environment: &EnvironmentState, players: &[PlayerId]) -> Vec<ScoreResult> {
    let mut scores: Vec<_> = players
        .iter()
        .map(|player| ScoreResult {
            player_id: player.clone(),
            total_power: total_power(&PowerContext::new(environment, player, players)),
            card_count: environment.in_play_count(player),
            is_winner: false,
        })
        .collect();

    if let Some(winner) = determine_winner(&scores) {
        scores[winner].is_winner = true;
    }
    scores
}

/// Index of the winning score, if there is a unique one.
///
/// ```
/// use skirmish_engine::core::PlayerId;
/// use skirmish_engine::rules::{determine_winner, ScoreResult};
///
/// let score = |id: &str, total_power, card_count| ScoreResult {
///     player_id: PlayerId::from(id),
///     total_power,
///     card_count,
///     is_winner: false,
/// };
///
/// // Equal power: more cards wins.
/// assert_eq!(determine_winner(&[score("a", 10, 3), score("b", 10, 4)]), Some(1));
/// // Equal on both: nobody wins.
/// assert_eq!(determine_winner(&[score("a", 10, 3), score("b", 10, 3)]), None);
/// ```
#[must_use]
pub fn determine_winner(scores: &[ScoreResult]) -> Option<usize> {
    let key = |s: &ScoreResult| (s.total_power, s.card_count);
    let best = scores.iter().map(key).max()?;

    let mut leaders = scores.iter().enumerate().filter(|&(_, s)| key(s) == best);
    let (index, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(index)
}
