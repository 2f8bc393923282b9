//! RocksDB column family definitions.
//!
//! # Column Families
//! | Name | Purpose | Key Format | Optimization |
//! |------|---------|------------|--------------|
//! | word_vectors | Word embeddings (packed 600 B or full 1200 B) | word (UTF-8) | Bloom filter, shared block cache |
//! | neighbors | Precomputed neighbor table per secret | secret 0x00 neighbor | Ordered prefix scans |
//! | similarity_ranges | Similarity landmarks per secret | secret (UTF-8) | No compression |
//!
//! `word_vectors` and `neighbors` share one LRU block cache; the small
//! `similarity_ranges` family uses RocksDB defaults.

use rocksdb::{BlockBasedOptions, Cache, ColumnFamilyDescriptor, Options};

/// Column family name constants.
pub mod cf_names {
    /// Word embedding vectors.
    pub const WORD_VECTORS: &str = "word_vectors";

    /// Neighbor rows keyed by `secret 0x00 neighbor`.
    /// Value: JSON `{"percentile": u32, "similarity": f64}`
    pub const NEIGHBORS: &str = "neighbors";

    /// Similarity landmarks keyed by secret.
    /// Value: JSON `{"top": f64, "top10": f64, "rest": f64}`
    pub const SIMILARITY_RANGES: &str = "similarity_ranges";

    pub const ALL: &[&str] = &[WORD_VECTORS, NEIGHBORS, SIMILARITY_RANGES];
}

/// Options for word vectors: point lookups on every guess.
pub fn word_vectors_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_cache_index_and_filter_blocks(true);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts.create_if_missing(true);

    opts
}

/// Options for neighbor rows.
///
/// Keys are variable length, so no fixed prefix extractor; scans seek to
/// `secret 0x00` and stop at the first key outside that prefix.
pub fn neighbors_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_cache_index_and_filter_blocks(true);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts.create_if_missing(true);

    opts
}

/// Options for similarity ranges (small, one row per secret).
pub fn ranges_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::None);
    opts.create_if_missing(true);

    opts
}

/// All column family descriptors with their tuned options.
///
/// ```ignore
/// use rocksdb::Cache;
/// use multimantle_storage::column_families::get_column_family_descriptors;
///
/// let cache = Cache::new_lru_cache(64 * 1024 * 1024);
/// assert_eq!(get_column_family_descriptors(&cache).len(), 3);
/// ```
pub fn get_column_family_descriptors(block_cache: &Cache) -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(cf_names::WORD_VECTORS, word_vectors_options(block_cache)),
        ColumnFamilyDescriptor::new(cf_names::NEIGHBORS, neighbors_options(block_cache)),
        ColumnFamilyDescriptor::new(cf_names::SIMILARITY_RANGES, ranges_options()),
    ]
}
