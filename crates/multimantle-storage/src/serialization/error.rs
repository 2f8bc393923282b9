//! Serialization error types.

use thiserror::Error;

/// Errors from encoding or decoding stored records.
///
/// Converted to [`StorageError::Serialization`](crate::StorageError::Serialization)
/// when propagated from storage operations.
///
/// ```rust
/// use multimantle_storage::SerializationError;
///
/// let error = SerializationError::InvalidVectorSize { actual: 13 };
/// assert!(error.to_string().contains("13"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SerializationError {
    #[error("Serialization failed: {0}")]
    SerializeFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    /// A stored vector payload was neither packed (600 bytes) nor full (1200 bytes).
    #[error("Invalid vector size: expected 600 or 1200 bytes, got {actual}")]
    InvalidVectorSize { actual: usize },

    /// A vector to encode did not have the expected number of components.
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// A word cannot be used as a key (empty, or contains the 0x00 separator).
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for SerializationError {
    fn from(e: serde_json::Error) -> Self {
        SerializationError::DeserializeFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_vector_size_message() {
        let error = SerializationError::InvalidVectorSize { actual: 13 };
        let msg = error.to_string();
        assert!(msg.contains("600"));
        assert!(msg.contains("1200"));
        assert!(msg.contains("13"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: SerializationError = json_err.into();
        assert!(matches!(error, SerializationError::DeserializeFailed(_)));
    }
}
