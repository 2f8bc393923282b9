//! Storage error types for the RocksDB backend.

use multimantle_core::CoreError;
use thiserror::Error;

use crate::serialization::SerializationError;

/// Storage operation errors.
///
/// A missing word is `WordNotFound`, never an empty vector, so the engine
/// can tell "not in the vocabulary" apart from a failed read.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database failed to open.
    #[error("Failed to open database at '{path}': {message}")]
    OpenFailed { path: String, message: String },

    /// Column family not found (only if the DB was opened without it).
    #[error("Column family '{name}' not found")]
    ColumnFamilyNotFound { name: String },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),

    /// The word has no row in `word_vectors`.
    #[error("Word not found: {word}")]
    WordNotFound { word: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<SerializationError> for StorageError {
    fn from(e: SerializationError) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

impl From<StorageError> for CoreError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::WordNotFound { word } => CoreError::WordNotFound { word },
            StorageError::Serialization(msg) => CoreError::SerializationError(msg),
            other => CoreError::StorageError(other.to_string()),
        }
    }
}
