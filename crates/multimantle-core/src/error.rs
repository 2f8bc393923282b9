//! Error types for multimantle-core.

use thiserror::Error;

/// Top-level error type for multimantle-core.
///
/// Every variant leaves the engine state untouched: an operation that
/// fails never partially mutates a game.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The word has no vector record in the store.
    #[error("Word not found: {word}")]
    WordNotFound { word: String },

    /// A simultaneous-mode guess came from a player that never joined.
    #[error("Player not registered: {player}")]
    PlayerNotRegistered { player: String },

    /// A guess, status or hint query was made before `start`.
    #[error("Game has not been started")]
    GameNotStarted,

    /// `start` was called on a game that already has a secret.
    #[error("Game already started with a secret of {secret_len} characters")]
    GameAlreadyStarted { secret_len: usize },

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidVector { expected: usize, actual: usize },

    /// No secret word exists for the requested game number.
    #[error("No secret word for day {day}")]
    SecretNotFound { day: i64 },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Create a word not found error.
    pub fn word_not_found(word: impl Into<String>) -> Self {
        Self::WordNotFound { word: word.into() }
    }

    /// Create a player not registered error.
    pub fn player_not_registered(player: impl Into<String>) -> Self {
        Self::PlayerNotRegistered {
            player: player.into(),
        }
    }

    /// Whether the end user can correct this failure themselves
    /// (by guessing another word or joining the game first).
    ///
    /// `GameNotStarted` and `GameAlreadyStarted` indicate an ordering bug in
    /// the calling layer and are reported as such.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::WordNotFound { .. } | Self::PlayerNotRegistered { .. }
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
