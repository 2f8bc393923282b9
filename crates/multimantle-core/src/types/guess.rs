//! Scored guesses and round results.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One scored guess.
///
/// Created once per distinct (normalized) word in a game and never
/// modified afterwards. Its position in the leaderboard is derived from
/// the game's sorted record list, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// Cosine similarity to the secret, scaled by 100 (roughly [-100, 100]).
    pub similarity: f64,
    /// Normalized (lowercase) guessed word.
    pub word: String,
    /// Neighbor rank class against the secret; `None` when the word is
    /// outside the secret's known-neighbor set ("cold").
    pub percentile: Option<u32>,
    /// 1-based order of first submission within the game.
    pub rank: usize,
}

impl GuessRecord {
    /// Whether the guess landed inside the secret's neighbor table.
    pub fn is_cold(&self) -> bool {
        self.percentile.is_none()
    }
}

/// Per-player results of one resolved simultaneous round, in player
/// registration order.
pub type RoundResult = Vec<(PlayerId, GuessRecord)>;

/// What a guess submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// Independent-guessing modes score immediately.
    Scored(GuessRecord),
    /// Simultaneous mode: the guess is pending until every player submits.
    RoundPending,
    /// Simultaneous mode: this submission completed the round.
    RoundResolved(RoundResult),
}

impl GuessOutcome {
    /// Every record this outcome carries, in order.
    pub fn records(&self) -> Vec<&GuessRecord> {
        match self {
            GuessOutcome::Scored(record) => vec![record],
            GuessOutcome::RoundPending => Vec::new(),
            GuessOutcome::RoundResolved(round) => round.iter().map(|(_, r)| r).collect(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, GuessOutcome::RoundPending)
    }
}
