//! Word vector, neighbor and similarity-range operations.
//!
//! Writes populate a store from precomputed data; reads back the
//! `VectorStore` implementation. Bulk `import_*` methods group rows into a
//! single `WriteBatch` so an import is applied all-or-nothing.

use multimantle_core::{SimilarityRange, WordVector};
use rocksdb::{Direction, IteratorMode, WriteBatch};
use tracing::{debug, info};

use crate::column_families::cf_names;
use crate::serialization::{
    deserialize_neighbor_entry, deserialize_similarity_range, deserialize_word_vector,
    neighbor_key, neighbor_prefix, pack_word_vector, parse_neighbor_key,
    serialize_neighbor_entry, serialize_similarity_range, serialize_word_vector, NeighborEntry,
};

use super::core::RocksDbVectorStore;
use super::error::{StorageError, StorageResult};

fn encode_vector(vector: &[f32], packed: bool) -> StorageResult<Vec<u8>> {
    let bytes = if packed {
        pack_word_vector(vector)?
    } else {
        serialize_word_vector(vector)?
    };
    Ok(bytes)
}

impl RocksDbVectorStore {
    // =========================================================================
    // word_vectors CF
    // =========================================================================

    /// Store `word`'s vector as full 1200-byte `f32`.
    pub fn put_word_vector(&self, word: &str, vector: &[f32]) -> StorageResult<()> {
        self.put_encoded_vector(word, encode_vector(vector, false)?)
    }

    /// Store `word`'s vector packed to 600 bytes of bfloat16.
    pub fn put_packed_word_vector(&self, word: &str, vector: &[f32]) -> StorageResult<()> {
        self.put_encoded_vector(word, encode_vector(vector, true)?)
    }

    fn put_encoded_vector(&self, word: &str, bytes: Vec<u8>) -> StorageResult<()> {
        let cf = self.get_cf(cf_names::WORD_VECTORS)?;
        self.db
            .put_cf(cf, word.as_bytes(), bytes)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    /// Vector of `word`, expanded to 300 `f32` components.
    ///
    /// # Errors
    /// * `StorageError::WordNotFound` - no row for `word`
    /// * `StorageError::Serialization` - stored payload has a bad size
    pub fn get_word_vector(&self, word: &str) -> StorageResult<WordVector> {
        let cf = self.get_cf(cf_names::WORD_VECTORS)?;
        let bytes = self
            .db
            .get_pinned_cf(cf, word.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .ok_or_else(|| StorageError::WordNotFound {
                word: word.to_string(),
            })?;
        Ok(deserialize_word_vector(&bytes)?)
    }

    pub fn contains_word(&self, word: &str) -> StorageResult<bool> {
        let cf = self.get_cf(cf_names::WORD_VECTORS)?;
        let found = self
            .db
            .get_pinned_cf(cf, word.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .is_some();
        Ok(found)
    }

    /// Number of words with a stored vector. Full scan.
    pub fn word_count(&self) -> StorageResult<usize> {
        let cf = self.get_cf(cf_names::WORD_VECTORS)?;
        let mut count = 0;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            count += 1;
        }
        Ok(count)
    }

    // =========================================================================
    // neighbors CF
    // =========================================================================

    pub fn put_neighbor(
        &self,
        secret: &str,
        neighbor: &str,
        entry: &NeighborEntry,
    ) -> StorageResult<()> {
        let cf = self.get_cf(cf_names::NEIGHBORS)?;
        let key = neighbor_key(secret, neighbor)?;
        let value = serialize_neighbor_entry(entry)?;
        self.db
            .put_cf(cf, key, value)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    /// The `(secret, neighbor)` row, if one was precomputed.
    pub fn get_neighbor(&self, secret: &str, neighbor: &str) -> StorageResult<Option<NeighborEntry>> {
        let cf = self.get_cf(cf_names::NEIGHBORS)?;
        let key = neighbor_key(secret, neighbor)?;
        self.db
            .get_pinned_cf(cf, key)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .map(|bytes| deserialize_neighbor_entry(&bytes).map_err(StorageError::from))
            .transpose()
    }

    /// Every neighbor row of `secret` in key (word) order.
    pub fn neighbors_of(&self, secret: &str) -> StorageResult<Vec<(String, NeighborEntry)>> {
        let cf = self.get_cf(cf_names::NEIGHBORS)?;
        let prefix = neighbor_prefix(secret)?;

        let mut rows = Vec::new();
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix.as_slice(), Direction::Forward));
        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            let (_, neighbor) = parse_neighbor_key(&key)?;
            rows.push((neighbor, deserialize_neighbor_entry(&value)?));
        }
        debug!(secret_len = secret.len(), rows = rows.len(), "Scanned neighbor rows");
        Ok(rows)
    }

    // =========================================================================
    // similarity_ranges CF
    // =========================================================================

    pub fn put_similarity_range(&self, secret: &str, range: &SimilarityRange) -> StorageResult<()> {
        let cf = self.get_cf(cf_names::SIMILARITY_RANGES)?;
        let value = serialize_similarity_range(range)?;
        self.db
            .put_cf(cf, secret.as_bytes(), value)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    pub fn get_similarity_range(&self, secret: &str) -> StorageResult<Option<SimilarityRange>> {
        let cf = self.get_cf(cf_names::SIMILARITY_RANGES)?;
        self.db
            .get_pinned_cf(cf, secret.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .map(|bytes| deserialize_similarity_range(&bytes).map_err(StorageError::from))
            .transpose()
    }

    // =========================================================================
    // Bulk import
    // =========================================================================

    /// Write many vectors in one batch. Returns the number written.
    ///
    /// Every row is encoded before anything is written, so a bad row
    /// leaves the store untouched.
    pub fn import_word_vectors<I, W>(&self, rows: I, packed: bool) -> StorageResult<usize>
    where
        I: IntoIterator<Item = (W, WordVector)>,
        W: AsRef<str>,
    {
        let cf = self.get_cf(cf_names::WORD_VECTORS)?;
        let mut batch = WriteBatch::default();
        let mut count = 0;
        for (word, vector) in rows {
            let bytes = encode_vector(&vector, packed)?;
            batch.put_cf(cf, word.as_ref().as_bytes(), bytes);
            count += 1;
        }
        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        info!(count, packed, "Imported word vectors");
        Ok(count)
    }

    /// Write many `(secret, neighbor, entry)` rows in one batch.
    pub fn import_neighbors<I, S, N>(&self, rows: I) -> StorageResult<usize>
    where
        I: IntoIterator<Item = (S, N, NeighborEntry)>,
        S: AsRef<str>,
        N: AsRef<str>,
    {
        let cf = self.get_cf(cf_names::NEIGHBORS)?;
        let mut batch = WriteBatch::default();
        let mut count = 0;
        for (secret, neighbor, entry) in rows {
            let key = neighbor_key(secret.as_ref(), neighbor.as_ref())?;
            batch.put_cf(cf, key, serialize_neighbor_entry(&entry)?);
            count += 1;
        }
        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        info!(count, "Imported neighbor rows");
        Ok(count)
    }

    /// Write many similarity ranges in one batch.
    pub fn import_similarity_ranges<I, S>(&self, rows: I) -> StorageResult<usize>
    where
        I: IntoIterator<Item = (S, SimilarityRange)>,
        S: AsRef<str>,
    {
        let cf = self.get_cf(cf_names::SIMILARITY_RANGES)?;
        let mut batch = WriteBatch::default();
        let mut count = 0;
        for (secret, range) in rows {
            batch.put_cf(cf, secret.as_ref().as_bytes(), serialize_similarity_range(&range)?);
            count += 1;
        }
        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        info!(count, "Imported similarity ranges");
        Ok(count)
    }
}
