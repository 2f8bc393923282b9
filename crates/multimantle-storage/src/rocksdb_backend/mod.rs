//! RocksDB storage backend.
//!
//! # Module Structure
//! - `config`: Open options (RocksDbConfig)
//! - `error`: Error types (StorageError) and the conversion into `CoreError`
//! - `core`: `RocksDbVectorStore` struct with open/health/flush
//! - `word_ops`: Vector, neighbor and range reads/writes plus batch import
//! - `vector_store_impl`: The `VectorStore` trait implementation

mod config;
mod core;
mod error;
mod vector_store_impl;
mod word_ops;

#[cfg(test)]
mod tests_vector_store;
#[cfg(test)]
mod tests_word_ops;

pub use config::{RocksDbConfig, DEFAULT_CACHE_SIZE, DEFAULT_MAX_OPEN_FILES};

pub use error::{StorageError, StorageResult};

pub use core::RocksDbVectorStore;
