//! Read-only access to precomputed word vectors and neighbor tables.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{GuessLookup, NearbyWord, SimilarityRange, WordVector};

/// Lookup service the game engine scores guesses against.
///
/// All lookups match the word string exactly; the engine always passes
/// normalized (lowercase) words. Implementations must:
///
/// - return [`CoreError::WordNotFound`](crate::CoreError::WordNotFound) when a
///   word has no vector record, and a different variant for any other failure
/// - hand back vectors of exactly [`VECTOR_DIM`](crate::VECTOR_DIM) components
///
/// Any suspension while awaiting the backing store is a property of the
/// implementation; the engine treats each call as one atomic step.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Fetch the embedding vector of `word`.
    async fn fetch_vector(&self, word: &str) -> CoreResult<WordVector>;

    /// Fetch the vector of `word` plus its percentile against `secret`.
    ///
    /// `percentile` is `Some` only if `(secret, word)` is a precomputed
    /// neighbor pair.
    async fn fetch_guess(&self, secret: &str, word: &str) -> CoreResult<GuessLookup>;

    /// Up to `n` neighbors of `secret`, sorted by descending percentile.
    ///
    /// The secret's relation to itself is never included. Returns an empty
    /// list when `secret` has no neighbor rows.
    async fn fetch_nearby(&self, secret: &str, n: usize) -> CoreResult<Vec<NearbyWord>>;

    /// Similarity landmarks for `secret`, if any were precomputed.
    async fn fetch_similarity_range(&self, secret: &str) -> CoreResult<Option<SimilarityRange>>;
}
