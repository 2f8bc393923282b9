//! Read models returned by a [`VectorStore`](crate::traits::VectorStore).

use serde::{Deserialize, Serialize};

use super::WordVector;

/// A guess word's vector together with its neighbor relation to the secret.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessLookup {
    pub vector: WordVector,
    /// Present only when a precomputed (secret, word) neighbor row exists.
    pub percentile: Option<u32>,
}

/// One row of a secret's precomputed neighbor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyWord {
    pub word: String,
    pub percentile: u32,
    /// Similarity to the secret as stored in the neighbor table (percentage units).
    pub similarity: f64,
}

/// Similarity landmarks for a secret: the nearest neighbor, the 10th
/// nearest, and the far edge of the neighbor table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRange {
    pub top: f64,
    pub top10: f64,
    pub rest: f64,
}
