//! Multimantle Core Library
//!
//! Game-state and similarity-scoring engine for a multiplayer semantic
//! word-guessing game. Guesses are scored by cosine similarity of
//! precomputed word embeddings against a hidden secret word, and ranked
//! against a percentile table of the secret's known neighbors.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`GuessRecord`, `GameMode`, `NearbyWord`, `SimilarityRange`)
//! - The [`VectorStore`](traits::VectorStore) trait consumed by the engine
//! - Pure vector math in [`similarity`]
//! - The [`Game`](game::Game) state machine and the [`GameRegistry`](game::GameRegistry)
//! - Presentation helpers in [`format`]
//! - Secret-word selection in [`secrets`]
//! - Error types and configuration
//!
//! # Example
//!
//! ```
//! use multimantle_core::similarity::cosine_similarity;
//!
//! let a = vec![1.0_f32, 0.0, 0.0];
//! let b = vec![0.0_f32, 0.0, 0.0];
//! // Zero magnitude is the "maximally dissimilar" sentinel.
//! assert_eq!(cosine_similarity(&a, &b), -1.0);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod game;
pub mod secrets;
pub mod similarity;
pub mod stubs;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use game::{Game, GameRegistry, SharedGame};
pub use secrets::SecretWords;
pub use traits::VectorStore;
pub use types::{
    GameMode, GuessLookup, GuessOutcome, GuessRecord, NearbyWord, PlayerId, RoundResult,
    SessionId, SimilarityRange, WordVector, VECTOR_DIM,
};
