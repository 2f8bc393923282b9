//! Configuration for opening a `RocksDbVectorStore`.

use multimantle_core::config::StorageConfig;

/// Default block cache size: 64MB.
pub const DEFAULT_CACHE_SIZE: usize = 64 * 1024 * 1024;

/// Default maximum open files.
pub const DEFAULT_MAX_OPEN_FILES: i32 = 256;

/// RocksDB tuning knobs.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Maximum open files (default: 256).
    pub max_open_files: i32,
    /// Block cache size in bytes (default: 64MB).
    pub block_cache_size: usize,
    /// Create database if missing (default: true).
    pub create_if_missing: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            block_cache_size: DEFAULT_CACHE_SIZE,
            create_if_missing: true,
        }
    }
}

impl From<&StorageConfig> for RocksDbConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_open_files: config.max_open_files,
            block_cache_size: config.block_cache_size,
            create_if_missing: config.create_if_missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storage_config() {
        let from_core = RocksDbConfig::from(&StorageConfig::default());
        let default = RocksDbConfig::default();
        assert_eq!(from_core.block_cache_size, default.block_cache_size);
        assert_eq!(from_core.max_open_files, default.max_open_files);
        assert!(from_core.create_if_missing);
    }

    #[test]
    fn test_every_knob_comes_from_storage_config() {
        let storage = StorageConfig {
            block_cache_size: 1024,
            max_open_files: 16,
            create_if_missing: false,
            ..StorageConfig::default()
        };
        let RocksDbConfig {
            max_open_files,
            block_cache_size,
            create_if_missing,
        } = RocksDbConfig::from(&storage);
        assert_eq!(max_open_files, 16);
        assert_eq!(block_cache_size, 1024);
        assert!(!create_if_missing);
    }
}
