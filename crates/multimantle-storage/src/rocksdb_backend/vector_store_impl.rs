//! `VectorStore` implementation for `RocksDbVectorStore`.
//!
//! Delegates to the synchronous operations in `word_ops`; RocksDB reads
//! are point lookups or one short prefix scan, so they run inline.

use async_trait::async_trait;
use multimantle_core::{
    CoreResult, GuessLookup, NearbyWord, SimilarityRange, VectorStore, WordVector,
};
use tracing::instrument;

use super::core::RocksDbVectorStore;

#[async_trait]
impl VectorStore for RocksDbVectorStore {
    async fn fetch_vector(&self, word: &str) -> CoreResult<WordVector> {
        Ok(self.get_word_vector(word)?)
    }

    #[instrument(level = "debug", skip(self, secret))]
    async fn fetch_guess(&self, secret: &str, word: &str) -> CoreResult<GuessLookup> {
        let vector = self.get_word_vector(word)?;
        let percentile = self.get_neighbor(secret, word)?.map(|entry| entry.percentile);
        Ok(GuessLookup { vector, percentile })
    }

    /// Drops the secret's own row wherever it ranks, then sorts by
    /// percentile descending (ties by word).
    async fn fetch_nearby(&self, secret: &str, n: usize) -> CoreResult<Vec<NearbyWord>> {
        let mut nearby: Vec<NearbyWord> = self
            .neighbors_of(secret)?
            .into_iter()
            .filter(|(neighbor, _)| neighbor != secret)
            .map(|(word, entry)| NearbyWord {
                word,
                percentile: entry.percentile,
                similarity: entry.similarity,
            })
            .collect();
        nearby.sort_by(|a, b| {
            b.percentile
                .cmp(&a.percentile)
                .then_with(|| a.word.cmp(&b.word))
        });
        nearby.truncate(n);
        Ok(nearby)
    }

    async fn fetch_similarity_range(&self, secret: &str) -> CoreResult<Option<SimilarityRange>> {
        Ok(self.get_similarity_range(secret)?)
    }
}
