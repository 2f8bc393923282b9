//! The game state machine.
//!
//! A [`Game`] starts empty, becomes started exactly once when its secret's
//! vector is fetched, and then lives until the registry replaces it. There
//! is no finished state: the engine never declares a winner.
//!
//! # Invariants
//!
//! - `guessed_words` and `guess_records` always hold the same words
//! - `guess_records` is sorted by descending similarity, ties in rank order
//! - every failing operation leaves the game exactly as it was

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::round::{PendingGuess, RoundState};
use crate::error::{CoreError, CoreResult};
use crate::similarity::similarity_score;
use crate::traits::VectorStore;
use crate::types::{
    normalize_word, GameMode, GuessOutcome, GuessRecord, NearbyWord, PlayerId, RoundResult,
    SimilarityRange, WordVector,
};

/// The hidden word and its embedding.
struct Secret {
    word: String,
    vector: WordVector,
}

/// One running game instance.
///
/// Operations on a single game are expected to be serialized by the caller
/// (the [`GameRegistry`](super::GameRegistry) wraps each game in an async
/// mutex); different games share nothing but the read-only store.
pub struct Game {
    store: Arc<dyn VectorStore>,
    secret: Option<Secret>,
    mode: GameMode,
    /// Registration order; round results follow it.
    players: Vec<PlayerId>,
    guessed_words: HashSet<String>,
    guess_records: Vec<GuessRecord>,
    round: RoundState,
}

impl Game {
    /// Create an unstarted game backed by `store`.
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            store,
            secret: None,
            mode: GameMode::default(),
            players: Vec::new(),
            guessed_words: HashSet::new(),
            guess_records: Vec::new(),
            round: RoundState::default(),
        }
    }

    /// Fetch the secret's vector and start the game.
    ///
    /// # Errors
    /// - `GameAlreadyStarted` if the game has a secret already; restarting
    ///   means replacing the game in the registry
    /// - `WordNotFound` if the secret has no vector
    #[instrument(level = "debug", skip(self, secret), fields(mode = %mode))]
    pub async fn start(&mut self, secret: &str, mode: GameMode) -> CoreResult<()> {
        if let Some(current) = &self.secret {
            return Err(CoreError::GameAlreadyStarted {
                secret_len: current.word.chars().count(),
            });
        }

        let word = normalize_word(secret);
        let vector = self.store.fetch_vector(&word).await?;

        info!(mode = %mode, secret_len = word.chars().count(), "Game started");
        self.secret = Some(Secret { word, vector });
        self.mode = mode;
        Ok(())
    }

    /// Register a player. Idempotent; returns `true` if the player is new.
    ///
    /// Every player also gets an empty pending-guess slot, which only
    /// matters in simultaneous mode.
    pub fn add_player(&mut self, player: &str) -> bool {
        self.round.register(player);
        if self.players.iter().any(|p| p == player) {
            return false;
        }
        self.players.push(player.to_string());
        debug!(player = %player, players = self.players.len(), "Player joined");
        true
    }

    /// Submit a guess, dispatching on the game mode.
    ///
    /// CHAOS and TURNS score immediately. SIMUL collects the guess into the
    /// current round and reports whether the round resolved.
    pub async fn guess(&mut self, word: &str, player: &str) -> CoreResult<GuessOutcome> {
        self.require_secret()?;
        if self.mode.is_simultaneous() {
            return Ok(match self.submit_round_guess(word, player).await? {
                Some(round) => GuessOutcome::RoundResolved(round),
                None => GuessOutcome::RoundPending,
            });
        }
        self.score_guess(word).await.map(GuessOutcome::Scored)
    }

    /// Score one guess, the resolution routine every mode shares.
    ///
    /// A word that was already guessed returns its existing record without
    /// querying the store; rank and ordering stay unchanged.
    ///
    /// # Errors
    /// - `GameNotStarted` before `start`
    /// - whatever the store reports, typically `WordNotFound`
    #[instrument(level = "debug", skip(self, word))]
    pub async fn score_guess(&mut self, word: &str) -> CoreResult<GuessRecord> {
        let secret = self.require_secret()?;
        let word = normalize_word(word);

        if let Some(existing) = self.find_record(&word) {
            debug!(word = %word, rank = existing.rank, "Repeat guess");
            return Ok(existing.clone());
        }

        let lookup = self.store.fetch_guess(&secret.word, &word).await?;
        let similarity = similarity_score(&lookup.vector, &secret.vector);
        Ok(self.commit(word, similarity, lookup.percentile))
    }

    /// Record a guess for the current simultaneous round.
    ///
    /// The word is looked up and scored right away, so an unknown word is
    /// rejected here and the player's slot keeps its previous value. When this
    /// submission fills the last empty slot, the round resolves: players are
    /// scored in registration order through the same idempotent logic as
    /// [`score_guess`](Self::score_guess), and every slot is cleared.
    ///
    /// Returns `None` while the round is still waiting on other players.
    ///
    /// # Errors
    /// - `GameNotStarted` before `start`
    /// - `PlayerNotRegistered` if `player` never joined
    /// - whatever the store reports for a new word
    #[instrument(level = "debug", skip(self, word), fields(player = %player))]
    pub async fn submit_round_guess(
        &mut self,
        word: &str,
        player: &str,
    ) -> CoreResult<Option<RoundResult>> {
        let secret = self.require_secret()?;
        if !self.round.is_registered(player) {
            return Err(CoreError::player_not_registered(player));
        }

        let word = normalize_word(word);
        let pending = match self.find_record(&word) {
            Some(existing) => PendingGuess::Known(existing.clone()),
            None => {
                let lookup = self.store.fetch_guess(&secret.word, &word).await?;
                PendingGuess::Fresh {
                    similarity: similarity_score(&lookup.vector, &secret.vector),
                    percentile: lookup.percentile,
                    word,
                }
            }
        };

        self.round.submit(player, pending);
        if !self.round.is_complete() {
            debug!(
                submitted = self.round.submitted().count(),
                players = self.players.len(),
                "Round pending"
            );
            return Ok(None);
        }

        Ok(Some(self.resolve_round()))
    }

    /// The top `min(n, count)` guesses, best first.
    pub fn status(&self, n: usize) -> CoreResult<&[GuessRecord]> {
        self.require_secret()?;
        let n = n.min(self.guess_records.len());
        Ok(&self.guess_records[..n])
    }

    /// Up to `n` of the secret's nearest known neighbors, for hints.
    ///
    /// Reads the store only; guess state is untouched.
    pub async fn nearby(&self, n: usize) -> CoreResult<Vec<NearbyWord>> {
        let secret = self.require_secret()?;
        self.store.fetch_nearby(&secret.word, n).await
    }

    /// Precomputed similarity landmarks for the secret, if the store has them.
    pub async fn similarity_range(&self) -> CoreResult<Option<SimilarityRange>> {
        let secret = self.require_secret()?;
        self.store.fetch_similarity_range(&secret.word).await
    }

    /// The existing record for `word`, matched case-insensitively.
    pub fn record_for(&self, word: &str) -> Option<&GuessRecord> {
        self.find_record(&normalize_word(word))
    }

    pub fn is_started(&self) -> bool {
        self.secret.is_some()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_ref().map(|s| s.word.as_str())
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Players in registration order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn has_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    /// Number of distinct words guessed so far.
    pub fn guess_count(&self) -> usize {
        self.guessed_words.len()
    }

    /// Players still owing a guess in the current round, in registration order.
    pub fn pending_players(&self) -> Vec<&PlayerId> {
        self.players
            .iter()
            .filter(|p| self.round.pending_word(p).is_none())
            .collect()
    }

    fn require_secret(&self) -> CoreResult<&Secret> {
        self.secret.as_ref().ok_or(CoreError::GameNotStarted)
    }

    fn find_record(&self, normalized: &str) -> Option<&GuessRecord> {
        if !self.guessed_words.contains(normalized) {
            return None;
        }
        self.guess_records.iter().find(|r| r.word == normalized)
    }

    /// Insert a new record after every record scoring at least as high,
    /// which keeps the list sorted and ties in insertion order.
    fn commit(&mut self, word: String, similarity: f64, percentile: Option<u32>) -> GuessRecord {
        let record = GuessRecord {
            similarity,
            word,
            percentile,
            rank: self.guessed_words.len() + 1,
        };

        let position = self
            .guess_records
            .partition_point(|r| r.similarity.total_cmp(&similarity) != Ordering::Less);
        self.guessed_words.insert(record.word.clone());
        self.guess_records.insert(position, record.clone());

        debug!(
            word = %record.word,
            rank = record.rank,
            similarity = record.similarity,
            position = position + 1,
            "Guess recorded"
        );
        record
    }

    fn resolve_round(&mut self) -> RoundResult {
        let players = self.players.clone();
        let mut results = Vec::with_capacity(players.len());

        for player in players {
            let Some(pending) = self.round.take(&player) else {
                continue;
            };
            let record = match pending {
                PendingGuess::Known(record) => record,
                PendingGuess::Fresh {
                    word,
                    similarity,
                    percentile,
                } => match self.find_record(&word) {
                    // Someone earlier in this round guessed it first.
                    Some(existing) => existing.clone(),
                    None => self.commit(word, similarity, percentile),
                },
            };
            results.push((player, record));
        }

        self.round.clear();
        info!(guesses = results.len(), total = self.guess_count(), "Round resolved");
        results
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.secret {
            Some(secret) => write!(
                f,
                "Game \"{}\": {}, {} guesses",
                secret.word,
                self.mode,
                self.guess_records.len()
            ),
            None => write!(f, "Game (not started)"),
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("started", &self.is_started())
            .field("mode", &self.mode)
            .field("players", &self.players)
            .field("guess_count", &self.guess_count())
            .finish_non_exhaustive()
    }
}
