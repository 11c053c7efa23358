//! Errors returned across the engine boundary.
//!
//! Every rejected request yields a [`GameError`] value carrying a stable
//! [`ErrorCode`] and a human-readable message. A returned error guarantees
//! that no game state was touched.

use serde::{Deserialize, Serialize};

/// Stable error codes, serialized as `SCREAMING_SNAKE_CASE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No game is registered under the id.
    GameNotFound,
    /// Every seat is taken.
    GameFull,
    /// Malformed or missing payload, unknown action, or bad reference.
    InvalidMove,
    /// The actor is not the current player.
    NotPlayerTurn,
    /// The actor is not seated in this game (or is already seated on join).
    PlayerNotInGame,
    /// The action is not allowed in the current phase.
    WrongPhase,
    /// A discard cost was not met.
    InsufficientCards,
    /// Too few cards prepared to start a skirmish.
    EnvironmentNotReady,
    /// The resulting hand would exceed the phase's limit.
    HandLimitExceeded,
    /// The card is not legal on the active environment.
    CannotPlayCard,
    /// The item is not on the active environment.
    ItemNotAvailable,
}

impl ErrorCode {
    /// Wire name of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GameFull => "GAME_FULL",
            Self::InvalidMove => "INVALID_MOVE",
            Self::NotPlayerTurn => "NOT_PLAYER_TURN",
            Self::PlayerNotInGame => "PLAYER_NOT_IN_GAME",
            Self::WrongPhase => "WRONG_PHASE",
            Self::InsufficientCards => "INSUFFICIENT_CARDS",
            Self::EnvironmentNotReady => "ENVIRONMENT_NOT_READY",
            Self::HandLimitExceeded => "HAND_LIMIT_EXCEEDED",
            Self::CannotPlayCard => "CANNOT_PLAY_CARD",
            Self::ItemNotAvailable => "ITEM_NOT_AVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct GameError {
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Human-readable explanation.
    pub message: String,
}

impl GameError {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn game_not_found() -> Self {
        Self::new(ErrorCode::GameNotFound, "Game not found")
    }

    pub fn invalid_move(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMove, message)
    }

    pub fn not_player_turn() -> Self {
        Self::new(ErrorCode::NotPlayerTurn, "It is not your turn")
    }

    pub fn player_not_in_game() -> Self {
        Self::new(ErrorCode::PlayerNotInGame, "Player is not in this game")
    }

    pub fn wrong_phase(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WrongPhase, message)
    }
}

/// Result alias for engine operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GameError::not_player_turn();
        assert_eq!(err.to_string(), "NOT_PLAYER_TURN: It is not your turn");
    }

    #[test]
    fn test_code_serializes_as_wire_name() {
        for code in [
            ErrorCode::GameNotFound,
            ErrorCode::EnvironmentNotReady,
            ErrorCode::CannotPlayCard,
            ErrorCode::ItemNotAvailable,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_error_roundtrip() {
        let err = GameError::new(ErrorCode::HandLimitExceeded, "Hand still exceeds limit of 3");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("HAND_LIMIT_EXCEEDED"));

        let back: GameError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
