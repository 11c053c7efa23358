//! Actions: one player's request to change the game.
//!
//! An [`Action`] pairs the acting player with a [`Command`]. On the wire an
//! action travels as an envelope:
//!
//! ```json
//! { "type": "PREPARE_CARD", "playerId": "p1",
//!   "payload": { "cardId": 12, "environmentId": 3 } }
//! ```
//!
//! Decoding is strict about what each command needs and lenient about the
//! rest: unknown payload fields are ignored, while an unknown `type` or a
//! missing required field is an `INVALID_MOVE`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{GameError, GameResult};
use super::ids::{CardId, EnvironmentId, ItemId, PlayerId};

/// Cards named in a discard. Most discard costs are 0-2 cards.
pub type DiscardList = SmallVec<[CardId; 3]>;

/// The closed set of action types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    ReadyUp,
    PrepareCard,
    InitiateSkirmish,
    PlayCard,
    TakeItem,
    Pass,
    DiscardToHandLimit,
}

impl ActionType {
    pub const ALL: [ActionType; 7] = [
        ActionType::ReadyUp,
        ActionType::PrepareCard,
        ActionType::InitiateSkirmish,
        ActionType::PlayCard,
        ActionType::TakeItem,
        ActionType::Pass,
        ActionType::DiscardToHandLimit,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionType::ReadyUp => "READY_UP",
            ActionType::PrepareCard => "PREPARE_CARD",
            ActionType::InitiateSkirmish => "INITIATE_SKIRMISH",
            ActionType::PlayCard => "PLAY_CARD",
            ActionType::TakeItem => "TAKE_ITEM",
            ActionType::Pass => "PASS",
            ActionType::DiscardToHandLimit => "DISCARD_TO_HAND_LIMIT",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<ActionType> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the player wants to do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    ReadyUp,
    PrepareCard {
        card: CardId,
        environment: EnvironmentId,
    },
    InitiateSkirmish {
        environment: EnvironmentId,
    },
    PlayCard {
        card: CardId,
    },
    TakeItem {
        item: ItemId,
        discarded: DiscardList,
    },
    Pass,
    DiscardToHandLimit {
        discarded: DiscardList,
    },
}

impl Command {
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Command::ReadyUp => ActionType::ReadyUp,
            Command::PrepareCard { .. } => ActionType::PrepareCard,
            Command::InitiateSkirmish { .. } => ActionType::InitiateSkirmish,
            Command::PlayCard { .. } => ActionType::PlayCard,
            Command::TakeItem { .. } => ActionType::TakeItem,
            Command::Pass => ActionType::Pass,
            Command::DiscardToHandLimit { .. } => ActionType::DiscardToHandLimit,
        }
    }
}

/// A complete action.
///
/// ## Example
///
/// ```
/// use skirmish_engine::core::{Action, ActionType, CardId, EnvironmentId};
///
/// let action = Action::prepare_card("p1", CardId::new(4), EnvironmentId::new(30));
/// assert_eq!(action.action_type(), ActionType::PrepareCard);
///
/// let json = r#"{"type":"PASS","playerId":"p2"}"#;
/// let pass = Action::from_json(json).unwrap();
/// assert_eq!(pass, Action::pass("p2"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ActionEnvelope", into = "ActionEnvelope")]
pub struct Action {
    pub player: PlayerId,
    pub command: Command,
}

impl Action {
    #[must_use]
    pub fn new(player: impl Into<PlayerId>, command: Command) -> Self {
        Self {
            player: player.into(),
            command,
        }
    }

    #[must_use]
    pub fn ready_up(player: impl Into<PlayerId>) -> Self {
        Self::new(player, Command::ReadyUp)
    }

    #[must_use]
    pub fn prepare_card(
        player: impl Into<PlayerId>,
        card: CardId,
        environment: EnvironmentId,
    ) -> Self {
        Self::new(player, Command::PrepareCard { card, environment })
    }

    #[must_use]
    pub fn initiate_skirmish(player: impl Into<PlayerId>, environment: EnvironmentId) -> Self {
        Self::new(player, Command::InitiateSkirmish { environment })
    }

    #[must_use]
    pub fn play_card(player: impl Into<PlayerId>, card: CardId) -> Self {
        Self::new(player, Command::PlayCard { card })
    }

    #[must_use]
    pub fn take_item(player: impl Into<PlayerId>, item: ItemId, discarded: &[CardId]) -> Self {
        Self::new(
            player,
            Command::TakeItem {
                item,
                discarded: SmallVec::from_slice(discarded),
            },
        )
    }

    #[must_use]
    pub fn pass(player: impl Into<PlayerId>) -> Self {
        Self::new(player, Command::Pass)
    }

    #[must_use]
    pub fn discard_to_hand_limit(player: impl Into<PlayerId>, discarded: &[CardId]) -> Self {
        Self::new(
            player,
            Command::DiscardToHandLimit {
                discarded: SmallVec::from_slice(discarded),
            },
        )
    }

    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.command.action_type()
    }

    /// Decode a wire envelope.
    ///
    /// Any decoding failure is reported as `INVALID_MOVE`.
    pub fn from_json(json: &str) -> GameResult<Action> {
        let envelope: ActionEnvelope = serde_json::from_str(json)
            .map_err(|e| GameError::invalid_move(format!("Malformed action: {e}")))?;
        envelope.into_action()
    }
}

/// Optional action payload fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    #[serde(default)]
    pub card_id: Option<CardId>,
    #[serde(default)]
    pub environment_id: Option<EnvironmentId>,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub discarded_card_ids: Option<Vec<CardId>>,
}

/// Wire form of an [`Action`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    #[serde(default)]
    pub payload: Option<Payload>,
}

impl ActionEnvelope {
    /// Validate the envelope into a typed action.
    pub fn into_action(self) -> GameResult<Action> {
        let action_type = ActionType::parse(&self.action_type).ok_or_else(|| {
            GameError::invalid_move(format!("Unknown action type: {}", self.action_type))
        })?;
        let payload = self.payload.unwrap_or_default();

        let card = || {
            payload
                .card_id
                .ok_or_else(|| GameError::invalid_move("Card ID is required"))
        };
        let environment = || {
            payload
                .environment_id
                .ok_or_else(|| GameError::invalid_move("Environment ID is required"))
        };
        let discarded = || -> DiscardList {
            payload
                .discarded_card_ids
                .as_deref()
                .map(SmallVec::from_slice)
                .unwrap_or_default()
        };

        let command = match action_type {
            ActionType::ReadyUp => Command::ReadyUp,
            ActionType::PrepareCard => Command::PrepareCard {
                card: card()?,
                environment: environment()?,
            },
            ActionType::InitiateSkirmish => Command::InitiateSkirmish {
                environment: environment()?,
            },
            ActionType::PlayCard => Command::PlayCard { card: card()? },
            ActionType::TakeItem => Command::TakeItem {
                item: payload
                    .item_id
                    .ok_or_else(|| GameError::invalid_move("Item ID is required"))?,
                discarded: discarded(),
            },
            ActionType::Pass => Command::Pass,
            ActionType::DiscardToHandLimit => {
                if payload.discarded_card_ids.is_none() {
                    return Err(GameError::invalid_move("Discarded card IDs are required"));
                }
                Command::DiscardToHandLimit {
                    discarded: discarded(),
                }
            }
        };

        Ok(Action {
            player: self.player_id,
            command,
        })
    }
}

impl TryFrom<ActionEnvelope> for Action {
    type Error = GameError;

    fn try_from(envelope: ActionEnvelope) -> GameResult<Action> {
        envelope.into_action()
    }
}

impl From<Action> for ActionEnvelope {
    fn from(action: Action) -> Self {
        let mut payload = Payload::default();
        match &action.command {
            Command::ReadyUp | Command::Pass => {}
            Command::PrepareCard { card, environment } => {
                payload.card_id = Some(*card);
                payload.environment_id = Some(*environment);
            }
            Command::InitiateSkirmish { environment } => {
                payload.environment_id = Some(*environment);
            }
            Command::PlayCard { card } => payload.card_id = Some(*card),
            Command::TakeItem { item, discarded } => {
                payload.item_id = Some(*item);
                payload.discarded_card_ids = Some(discarded.to_vec());
            }
            Command::DiscardToHandLimit { discarded } => {
                payload.discarded_card_ids = Some(discarded.to_vec());
            }
        }
        ActionEnvelope {
            action_type: action.action_type().as_str().to_string(),
            player_id: action.player,
            payload: Some(payload),
        }
    }
}

/// An accepted action, kept in the game's history for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken (includes the acting player).
    pub action: Action,

    /// Turn number when the action was accepted.
    pub turn: u32,

    /// Position in the game's history, starting at 0.
    pub sequence: u64,

    pub accepted_at: DateTime<Utc>,
}

impl ActionRecord {
    /// Create a new action record stamped with the current time.
    #[must_use]
    pub fn new(action: Action, turn: u32, sequence: u64) -> Self {
        Self {
            action,
            turn,
            sequence,
            accepted_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.action.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorCode;

    #[test]
    fn test_action_type_names() {
        for action_type in ActionType::ALL {
            assert_eq!(ActionType::parse(action_type.as_str()), Some(action_type));
            let json = serde_json::to_string(&action_type).unwrap();
            assert_eq!(json, format!("\"{}\"", action_type.as_str()));
        }
        assert_eq!(ActionType::parse("DRAW_CARD"), None);
    }

    #[test]
    fn test_decode_prepare() {
        let json = r#"{"type":"PREPARE_CARD","playerId":"p1","payload":{"cardId":12,"environmentId":3,"note":"ignored"}}"#;
        let action = Action::from_json(json).unwrap();
        assert_eq!(action, Action::prepare_card("p1", CardId(12), EnvironmentId(3)));
    }

    #[test]
    fn test_decode_take_item_without_discards() {
        let json = r#"{"type":"TAKE_ITEM","playerId":"p1","payload":{"itemId":7}}"#;
        let action = Action::from_json(json).unwrap();
        assert_eq!(action, Action::take_item("p1", ItemId(7), &[]));
    }

    #[test]
    fn test_unknown_type_is_invalid_move() {
        let err = Action::from_json(r#"{"type":"DRAW_CARD","playerId":"p1"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMove);
        assert!(err.message.contains("DRAW_CARD"));
    }

    #[test]
    fn test_missing_fields_are_invalid_move() {
        let cases = [
            r#"{"type":"PLAY_CARD","playerId":"p1"}"#,
            r#"{"type":"PREPARE_CARD","playerId":"p1","payload":{"cardId":1}}"#,
            r#"{"type":"INITIATE_SKIRMISH","playerId":"p1","payload":{}}"#,
            r#"{"type":"TAKE_ITEM","playerId":"p1","payload":{"discardedCardIds":[1]}}"#,
            r#"{"type":"DISCARD_TO_HAND_LIMIT","playerId":"p1"}"#,
            r#"{"playerId":"p1"}"#,
            "not json",
        ];
        for json in cases {
            let err = Action::from_json(json).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidMove, "{json}");
        }
    }

    #[test]
    fn test_action_serializes_as_envelope() {
        let action = Action::take_item("p2", ItemId(9), &[CardId(1), CardId(2)]);
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["type"], "TAKE_ITEM");
        assert_eq!(json["playerId"], "p2");
        assert_eq!(json["payload"]["discardedCardIds"], serde_json::json!([1, 2]));

        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_record() {
        let record = ActionRecord::new(Action::pass("p1"), 4, 10);
        assert_eq!(record.player().as_str(), "p1");
        assert_eq!(record.turn, 4);
        assert_eq!(record.sequence, 10);
    }
}
