//! Outbound game events.
//!
//! Every successful entry point returns the events it produced, in order.
//! The engine never calls out to a listener, so there is no re-entrancy:
//! the caller decides where events go.
//!
//! ## Ordering
//!
//! Action-specific events come first, then `PHASE_CHANGED` if the phase
//! moved, then `GAME_UPDATED`. When a game finishes, `GAME_ENDED` is last.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::{Item, PlayerCard};
use crate::core::{CardId, EnvironmentId, GameId, Phase, PlayerColor, PlayerId, Standing};
use crate::rules::ScoreResult;

/// Event types, serialized as `{"type": ..., "payload": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EventKind {
    GameUpdated {
        phase: Phase,
        turn: u32,
        current_player_id: Option<PlayerId>,
    },
    PlayerJoined {
        player_id: PlayerId,
        name: String,
        color: PlayerColor,
    },
    PlayerLeft {
        player_id: PlayerId,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    /// Prepared cards are face-down, so only the count is public.
    CardPrepared {
        player_id: PlayerId,
        environment_id: EnvironmentId,
        prepared_count: usize,
    },
    SkirmishInitiated {
        environment_id: EnvironmentId,
        initiator_id: PlayerId,
    },
    CardPlayed {
        player_id: PlayerId,
        card: PlayerCard,
        environment_id: EnvironmentId,
    },
    ItemTaken {
        player_id: PlayerId,
        item: Item,
        environment_id: EnvironmentId,
        discarded_card_ids: Vec<CardId>,
    },
    PlayerPassed {
        player_id: PlayerId,
    },
    SkirmishEnded {
        environment_id: EnvironmentId,
        scores: Vec<ScoreResult>,
        winner_id: Option<PlayerId>,
    },
    GameEnded {
        standings: Vec<Standing>,
    },
}

impl EventKind {
    /// Wire name of the event type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            EventKind::GameUpdated { .. } => "GAME_UPDATED",
            EventKind::PlayerJoined { .. } => "PLAYER_JOINED",
            EventKind::PlayerLeft { .. } => "PLAYER_LEFT",
            EventKind::PhaseChanged { .. } => "PHASE_CHANGED",
            EventKind::CardPrepared { .. } => "CARD_PREPARED",
            EventKind::SkirmishInitiated { .. } => "SKIRMISH_INITIATED",
            EventKind::CardPlayed { .. } => "CARD_PLAYED",
            EventKind::ItemTaken { .. } => "ITEM_TAKEN",
            EventKind::PlayerPassed { .. } => "PLAYER_PASSED",
            EventKind::SkirmishEnded { .. } => "SKIRMISH_ENDED",
            EventKind::GameEnded { .. } => "GAME_ENDED",
        }
    }
}

/// An event stamped with its game and time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub game_id: GameId,
    pub timestamp: DateTime<Utc>,
    pub event: EventKind,
}

impl GameEvent {
    #[must_use]
    pub fn new(game_id: GameId, event: EventKind) -> Self {
        Self {
            game_id,
            timestamp: Utc::now(),
            event,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.event.name()
    }
}

/// Destination for emitted events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Events staged by one entry point.
///
/// Nothing reaches a sink until the entry point has succeeded.
#[derive(Debug)]
pub(crate) struct EventBuffer {
    game_id: GameId,
    events: Vec<GameEvent>,
}

impl EventBuffer {
    pub(crate) fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: EventKind) {
        self.events.push(GameEvent::new(self.game_id.clone(), event));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn flush<S: EventSink + ?Sized>(self, sink: &mut S) {
        for event in self.events {
            sink.emit(event);
        }
    }
}
