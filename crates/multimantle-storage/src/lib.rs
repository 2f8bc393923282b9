//! Multimantle Storage Layer
//!
//! Persistent [`VectorStore`](multimantle_core::VectorStore) backed by
//! RocksDB.
//!
//! # Architecture
//! - `column_families`: Column family definitions and tuned options
//! - `serialization`: Packed/full vector codec, neighbor keys and JSON records
//! - `rocksdb_backend`: The `RocksDbVectorStore` itself, its write/import
//!   operations and the `VectorStore` implementation

pub mod column_families;
pub mod rocksdb_backend;
pub mod serialization;

pub use column_families::{
    cf_names, get_column_family_descriptors, neighbors_options, ranges_options,
    word_vectors_options,
};

pub use rocksdb_backend::{
    RocksDbConfig, RocksDbVectorStore, StorageError, StorageResult, DEFAULT_CACHE_SIZE,
    DEFAULT_MAX_OPEN_FILES,
};

pub use serialization::{
    deserialize_word_vector, pack_word_vector, serialize_word_vector, NeighborEntry,
    SerializationError, FULL_VECTOR_LEN, PACKED_VECTOR_LEN,
};
