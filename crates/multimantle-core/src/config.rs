//! Configuration management for Multimantle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::types::GameMode;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{MULTIMANTLE_ENV}.toml (environment-specific)
    /// 3. Environment variables with MULTIMANTLE_ prefix
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("MULTIMANTLE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("MULTIMANTLE").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        if self.game.default_status_count == 0 {
            return Err(CoreError::ConfigError(
                "game.default_status_count must be greater than 0".into(),
            ));
        }

        if self.game.default_top_count == 0 {
            return Err(CoreError::ConfigError(
                "game.default_top_count must be greater than 0".into(),
            ));
        }

        if self.storage.block_cache_size == 0 {
            return Err(CoreError::ConfigError(
                "storage.block_cache_size must be greater than 0".into(),
            ));
        }

        if self.secrets.random_day_min > self.secrets.random_day_max {
            return Err(CoreError::ConfigError(format!(
                "secrets.random_day_min ({}) exceeds secrets.random_day_max ({})",
                self.secrets.random_day_min, self.secrets.random_day_max
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            include_location: false,
        }
    }
}

/// Location and tuning of the word-vector database.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub block_cache_size: usize,
    pub max_open_files: i32,
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/word2vec"),
            block_cache_size: 64 * 1024 * 1024,
            max_open_files: 256,
            create_if_missing: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub default_mode: GameMode,
    pub default_status_count: usize,
    pub default_top_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_mode: GameMode::Chaos,
            default_status_count: 5,
            default_top_count: 10,
        }
    }
}

/// Where secret words come from and how game numbers map onto them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub word_list_path: PathBuf,
    /// Day 0 of the daily puzzle numbering.
    pub epoch: NaiveDateTime,
    pub random_day_min: i64,
    pub random_day_max: i64,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            word_list_path: PathBuf::from("./data/secret_words.txt"),
            epoch: default_epoch(),
            random_day_min: 1000,
            random_day_max: 4256,
        }
    }
}

fn default_epoch() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2022, 1, 28)
        .and_then(|d| d.and_hms_opt(17, 0, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.default_mode, GameMode::Chaos);
        assert_eq!(config.game.default_status_count, 5);
        assert_eq!(config.game.default_top_count, 10);
    }

    #[test]
    fn test_default_epoch() {
        let config = SecretsConfig::default();
        assert_eq!(config.epoch.to_string(), "2022-01-28 17:00:00");
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let mut config = Config::default();
        config.game.default_status_count = 0;
        assert!(matches!(config.validate(), Err(CoreError::ConfigError(_))));

        let mut config = Config::default();
        config.game.default_top_count = 0;
        assert!(matches!(config.validate(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_day_range() {
        let mut config = Config::default();
        config.secrets.random_day_min = 10;
        config.secrets.random_day_max = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("random_day_min"));
    }

    #[test]
    fn test_from_file_partial_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[game]
default_mode = "simul"
default_status_count = 3

[storage]
path = "/tmp/vectors"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.game.default_mode, GameMode::Simul);
        assert_eq!(config.game.default_status_count, 3);
        assert_eq!(config.game.default_top_count, 10);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/vectors"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/multimantle.toml"))
            .unwrap_err();
        assert!(matches!(err, CoreError::ConfigError(_)));
    }
}
