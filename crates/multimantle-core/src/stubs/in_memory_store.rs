//! In-memory stub implementation of VectorStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::VectorStore;
use crate::types::{
    validate_dimension, GuessLookup, NearbyWord, SimilarityRange, WordVector, VECTOR_DIM,
};

#[derive(Debug, Default)]
struct Tables {
    vectors: HashMap<String, WordVector>,
    /// secret -> neighbor -> (percentile, similarity)
    neighbors: HashMap<String, HashMap<String, (u32, f64)>>,
    ranges: HashMap<String, SimilarityRange>,
}

/// HashMap-backed vector store.
///
/// O(n) neighbor listing and no persistence. Counts `fetch_guess` calls so
/// tests can assert that repeated guesses never reach the store, and can be
/// switched into an "unavailable" state that fails every read with a
/// storage error.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    tables: RwLock<Tables>,
    guess_lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style vector insert.
    ///
    /// # Panics
    /// Panics if `vector` is not [`VECTOR_DIM`] long.
    pub fn with_vector(mut self, word: &str, vector: WordVector) -> Self {
        assert_eq!(vector.len(), VECTOR_DIM, "stub vectors must be {}D", VECTOR_DIM);
        self.tables
            .get_mut()
            .vectors
            .insert(word.to_string(), vector);
        self
    }

    /// Builder-style neighbor insert.
    pub fn with_neighbor(mut self, secret: &str, neighbor: &str, percentile: u32, similarity: f64) -> Self {
        self.tables
            .get_mut()
            .neighbors
            .entry(secret.to_string())
            .or_default()
            .insert(neighbor.to_string(), (percentile, similarity));
        self
    }

    /// Builder-style similarity range insert.
    pub fn with_range(mut self, secret: &str, range: SimilarityRange) -> Self {
        self.tables.get_mut().ranges.insert(secret.to_string(), range);
        self
    }

    pub async fn insert_vector(&self, word: &str, vector: WordVector) -> CoreResult<()> {
        validate_dimension(&vector)?;
        self.tables
            .write()
            .await
            .vectors
            .insert(word.to_string(), vector);
        Ok(())
    }

    /// Number of `fetch_guess` calls served so far (including failures).
    pub fn guess_lookups(&self) -> usize {
        self.guess_lookups.load(Ordering::SeqCst)
    }

    /// Make every subsequent read fail with `CoreError::StorageError`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> CoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("in-memory store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn fetch_vector(&self, word: &str) -> CoreResult<WordVector> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables
            .vectors
            .get(word)
            .cloned()
            .ok_or_else(|| CoreError::word_not_found(word))
    }

    async fn fetch_guess(&self, secret: &str, word: &str) -> CoreResult<GuessLookup> {
        self.guess_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let tables = self.tables.read().await;
        let vector = tables
            .vectors
            .get(word)
            .cloned()
            .ok_or_else(|| CoreError::word_not_found(word))?;
        let percentile = tables
            .neighbors
            .get(secret)
            .and_then(|n| n.get(word))
            .map(|(percentile, _)| *percentile);
        Ok(GuessLookup { vector, percentile })
    }

    async fn fetch_nearby(&self, secret: &str, n: usize) -> CoreResult<Vec<NearbyWord>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let Some(rows) = tables.neighbors.get(secret) else {
            return Ok(Vec::new());
        };

        let mut nearby: Vec<NearbyWord> = rows
            .iter()
            .filter(|(word, _)| word.as_str() != secret)
            .map(|(word, (percentile, similarity))| NearbyWord {
                word: word.clone(),
                percentile: *percentile,
                similarity: *similarity,
            })
            .collect();
        // HashMap order is arbitrary: tie-break on word for determinism.
        nearby.sort_by(|a, b| b.percentile.cmp(&a.percentile).then_with(|| a.word.cmp(&b.word)));
        nearby.truncate(n);
        Ok(nearby)
    }

    async fn fetch_similarity_range(&self, secret: &str) -> CoreResult<Option<SimilarityRange>> {
        self.check_available()?;
        Ok(self.tables.read().await.ranges.get(secret).copied())
    }
}

/// Unit vector along `axis`.
pub fn axis_vector(axis: usize) -> WordVector {
    let mut v = vec![0.0; VECTOR_DIM];
    v[axis % VECTOR_DIM] = 1.0;
    v
}

/// Unit-length vector whose cosine similarity with `axis_vector(axis)` is `cos`.
///
/// The remaining weight goes on the next axis.
pub fn blend_vector(axis: usize, cos: f32) -> WordVector {
    let mut v = vec![0.0; VECTOR_DIM];
    v[axis % VECTOR_DIM] = cos;
    v[(axis + 1) % VECTOR_DIM] = (1.0 - cos * cos).max(0.0).sqrt();
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;

    fn store() -> InMemoryVectorStore {
        InMemoryVectorStore::new()
            .with_vector("ocean", axis_vector(0))
            .with_vector("wave", blend_vector(0, 0.81))
            .with_vector("rock", axis_vector(5))
            .with_neighbor("ocean", "ocean", 1000, 100.0)
            .with_neighbor("ocean", "wave", 42, 81.0)
            .with_neighbor("ocean", "sea", 999, 90.0)
    }

    #[test]
    fn test_blend_vector_cosine() {
        let sim = cosine_similarity(&blend_vector(3, 0.25), &axis_vector(3));
        assert!((sim - 0.25).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_fetch_guess_percentile() {
        let store = store();
        let wave = store.fetch_guess("ocean", "wave").await.unwrap();
        assert_eq!(wave.percentile, Some(42));

        let rock = store.fetch_guess("ocean", "rock").await.unwrap();
        assert_eq!(rock.percentile, None);

        let missing = store.fetch_guess("ocean", "zzyzx").await.unwrap_err();
        assert!(matches!(missing, CoreError::WordNotFound { .. }));
        assert_eq!(store.guess_lookups(), 3);
    }

    #[tokio::test]
    async fn test_fetch_nearby_skips_secret() {
        let store = store();
        let nearby = store.fetch_nearby("ocean", 10).await.unwrap();
        let words: Vec<&str> = nearby.iter().map(|n| n.word.as_str()).collect();
        assert_eq!(words, vec!["sea", "wave"]);

        assert_eq!(store.fetch_nearby("ocean", 1).await.unwrap().len(), 1);
        assert!(store.fetch_nearby("rock", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_is_not_word_not_found() {
        let store = store();
        store.set_unavailable(true);
        let err = store.fetch_vector("ocean").await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
        store.set_unavailable(false);
        assert!(store.fetch_vector("ocean").await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_vector_validates_dimension() {
        let store = InMemoryVectorStore::new();
        let err = store.insert_vector("short", vec![1.0; 3]).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidVector { .. }));
        store.insert_vector("ok", axis_vector(1)).await.unwrap();
        assert_eq!(store.fetch_vector("ok").await.unwrap(), axis_vector(1));
    }
}
