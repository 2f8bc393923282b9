//! Neighbor-table keys and JSON records.
//!
//! Neighbor keys are `secret 0x00 neighbor` so all rows of one secret are
//! contiguous and a forward scan from `secret 0x00` visits exactly them.

use multimantle_core::SimilarityRange;
use serde::{Deserialize, Serialize};

use super::error::SerializationError;

const KEY_SEPARATOR: u8 = 0x00;

/// Value stored for one `(secret, neighbor)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub percentile: u32,
    /// Similarity in percentage units, as precomputed.
    pub similarity: f64,
}

fn check_word(word: &str) -> Result<(), SerializationError> {
    if word.is_empty() {
        return Err(SerializationError::InvalidKey("empty word".into()));
    }
    if word.as_bytes().contains(&KEY_SEPARATOR) {
        return Err(SerializationError::InvalidKey(format!(
            "word contains NUL byte: {:?}",
            word
        )));
    }
    Ok(())
}

/// Key of one neighbor row.
pub fn neighbor_key(secret: &str, neighbor: &str) -> Result<Vec<u8>, SerializationError> {
    check_word(neighbor)?;
    let mut key = neighbor_prefix(secret)?;
    key.extend_from_slice(neighbor.as_bytes());
    Ok(key)
}

/// Prefix shared by every neighbor row of `secret`.
pub fn neighbor_prefix(secret: &str) -> Result<Vec<u8>, SerializationError> {
    check_word(secret)?;
    let mut prefix = Vec::with_capacity(secret.len() + 1);
    prefix.extend_from_slice(secret.as_bytes());
    prefix.push(KEY_SEPARATOR);
    Ok(prefix)
}

/// Split a neighbor key back into `(secret, neighbor)`.
pub fn parse_neighbor_key(key: &[u8]) -> Result<(String, String), SerializationError> {
    let split = key
        .iter()
        .position(|&b| b == KEY_SEPARATOR)
        .ok_or_else(|| SerializationError::InvalidKey("missing separator".into()))?;
    let secret = std::str::from_utf8(&key[..split])
        .map_err(|e| SerializationError::InvalidKey(e.to_string()))?;
    let neighbor = std::str::from_utf8(&key[split + 1..])
        .map_err(|e| SerializationError::InvalidKey(e.to_string()))?;
    Ok((secret.to_string(), neighbor.to_string()))
}

pub fn serialize_neighbor_entry(entry: &NeighborEntry) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(entry).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

pub fn deserialize_neighbor_entry(bytes: &[u8]) -> Result<NeighborEntry, SerializationError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn serialize_similarity_range(range: &SimilarityRange) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(range).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

pub fn deserialize_similarity_range(bytes: &[u8]) -> Result<SimilarityRange, SerializationError> {
    Ok(serde_json::from_slice(bytes)?)
}
