//! Core `RocksDbVectorStore` struct and database lifecycle.
//!
//! ```text
//! RocksDbVectorStore
//! ├── DB (RocksDB instance)
//! │   ├── CF: word_vectors      - word → packed/full vector
//! │   ├── CF: neighbors         - secret 0x00 neighbor → {percentile, similarity}
//! │   └── CF: similarity_ranges - secret → {top, top10, rest}
//! └── Cache (LRU block cache, 64MB default)
//! ```
//!
//! ```rust
//! use multimantle_storage::RocksDbVectorStore;
//! use tempfile::TempDir;
//!
//! let tmp = TempDir::new().unwrap();
//! let store = RocksDbVectorStore::open(tmp.path()).unwrap();
//! store.health_check().unwrap();
//! store.flush_all().unwrap();
//! ```

use rocksdb::{Cache, ColumnFamily, Options, DB};
use std::path::Path;
use tracing::info;

use crate::column_families::{cf_names, get_column_family_descriptors};

use super::config::RocksDbConfig;
use super::error::StorageError;

/// RocksDB-backed word vector store.
///
/// All methods take `&self`; RocksDB handles locking internally, so the
/// store can be shared as `Arc<RocksDbVectorStore>` (or `Arc<dyn VectorStore>`).
pub struct RocksDbVectorStore {
    pub(crate) db: DB,

    /// Kept alive for the database lifetime.
    #[allow(dead_code)]
    cache: Cache,

    path: String,
}

impl RocksDbVectorStore {
    /// Open (creating if needed) a store with default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::open_with_config(path, RocksDbConfig::default())
    }

    /// Open a store with custom configuration.
    ///
    /// # Errors
    ///
    /// * `StorageError::OpenFailed` - path is invalid, permissions denied,
    ///   database is locked, or `create_if_missing` is off and nothing exists
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: RocksDbConfig,
    ) -> Result<Self, StorageError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let cache = Cache::new_lru_cache(config.block_cache_size);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(config.create_if_missing);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_open_files(config.max_open_files);

        let cf_descriptors = get_column_family_descriptors(&cache);

        let db = DB::open_cf_descriptors(&db_opts, &path_str, cf_descriptors).map_err(|e| {
            StorageError::OpenFailed {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        info!(path = %path_str, cache_bytes = config.block_cache_size, "Opened vector store");

        Ok(Self {
            db,
            cache,
            path: path_str,
        })
    }

    /// Handle of a column family; use `cf_names::*` constants.
    pub fn get_cf(&self, name: &str) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound {
                name: name.to_string(),
            })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Verify every column family is accessible. Does not scan data.
    pub fn health_check(&self) -> Result<(), StorageError> {
        for cf_name in cf_names::ALL {
            self.get_cf(cf_name)?;
        }
        Ok(())
    }

    /// Flush all column families to disk.
    pub fn flush_all(&self) -> Result<(), StorageError> {
        for cf_name in cf_names::ALL {
            let cf = self.get_cf(cf_name)?;
            self.db
                .flush_cf(cf)
                .map_err(|e| StorageError::FlushFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RocksDbVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbVectorStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
