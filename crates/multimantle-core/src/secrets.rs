//! Secret-word selection.
//!
//! Secrets come from an ordered word list where position `n` is the
//! secret of daily game number `n`. Two list formats are accepted:
//!
//! ```text
//! ocean            secretWords = [
//! forest           "ocean",
//! mountain         "forest",
//!                  ];
//! ```
//!
//! i.e. bare words one per line, or a JavaScript array literal with one
//! quoted word per line. Only blank lines and the array brackets are
//! skipped; every other line counts as an entry.

use std::path::Path;

use chrono::NaiveDateTime;
use rand::Rng;
use tracing::{debug, info};

use crate::config::SecretsConfig;
use crate::error::{CoreError, CoreResult};

/// Ordered list of secret words plus the day numbering that indexes it.
#[derive(Debug, Clone)]
pub struct SecretWords {
    words: Vec<String>,
    epoch: NaiveDateTime,
    random_day_min: i64,
    random_day_max: i64,
}

impl SecretWords {
    /// Parse a word list using the day numbering from `config`.
    pub fn parse(content: &str, config: &SecretsConfig) -> Self {
        let words: Vec<String> = content.lines().filter_map(parse_line).collect();
        debug!(count = words.len(), "Parsed secret word list");
        Self {
            words,
            epoch: config.epoch,
            random_day_min: config.random_day_min,
            random_day_max: config.random_day_max,
        }
    }

    /// Load the word list named by `config.word_list_path`.
    pub fn load(config: &SecretsConfig) -> CoreResult<Self> {
        Self::from_file(&config.word_list_path, config)
    }

    pub fn from_file(path: &Path, config: &SecretsConfig) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read secret word list {}: {}",
                path.display(),
                e
            ))
        })?;
        let secrets = Self::parse(&content, config);
        info!(path = %path.display(), count = secrets.len(), "Loaded secret word list");
        Ok(secrets)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Secret of daily game number `day`.
    pub fn secret_for_day(&self, day: i64) -> CoreResult<&str> {
        usize::try_from(day)
            .ok()
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
            .ok_or(CoreError::SecretNotFound { day })
    }

    /// Whole days elapsed between the epoch and `now`.
    pub fn day_number(&self, now: NaiveDateTime) -> i64 {
        (now - self.epoch).num_days()
    }

    /// Today's game number and secret, by local time.
    pub fn today(&self) -> CoreResult<(i64, &str)> {
        let day = self.day_number(chrono::Local::now().naive_local());
        Ok((day, self.secret_for_day(day)?))
    }

    /// A random game number from the configured far range, clamped to the
    /// list, with its secret.
    pub fn random_far<R: Rng + ?Sized>(&self, rng: &mut R) -> CoreResult<(i64, &str)> {
        let last = self.words.len() as i64 - 1;
        if last < 0 {
            return Err(CoreError::SecretNotFound {
                day: self.random_day_min,
            });
        }
        let max = self.random_day_max.min(last);
        let min = self.random_day_min.min(max);
        let day = rng.gen_range(min..=max);
        Ok((day, self.secret_for_day(day)?))
    }
}

/// The word on one list line, or `None` for a line that holds no entry
/// (blank, the array header or the closing bracket). Any other line is an
/// entry, whatever it contains, so positions match game numbers.
fn parse_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.ends_with('[') || trimmed.starts_with(']') {
        return None;
    }
    let entry = trimmed.trim_end_matches(',').trim();
    let word = entry
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            entry
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(entry);
    Some(word.to_string())
}
