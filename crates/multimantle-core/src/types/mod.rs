//! Core domain types for the guessing game.
//!
//! - [`WordVector`]: a word's 300-dimensional embedding
//! - [`GameMode`]: CHAOS / SIMUL / TURNS play styles
//! - [`GuessRecord`]: one scored guess, immutable once created
//! - [`GuessOutcome`] / [`RoundResult`]: what a guess submission produced
//! - [`NearbyWord`], [`SimilarityRange`], [`GuessLookup`]: store read models

mod guess;
mod mode;
mod nearby;
mod vector;

pub use guess::{GuessOutcome, GuessRecord, RoundResult};
pub use mode::GameMode;
pub use nearby::{GuessLookup, NearbyWord, SimilarityRange};
pub use vector::{validate_dimension, WordVector, VECTOR_DIM};

/// Identifier of a player (chat user id, nickname, ...).
pub type PlayerId = String;

/// Identifier of a game session (e.g. a chat channel).
pub type SessionId = String;

/// Canonical form of a guessed or secret word: trimmed and lowercase.
///
/// The store is queried with exactly this form.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}
