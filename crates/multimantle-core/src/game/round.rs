//! Pending-guess bookkeeping for simultaneous rounds.

use std::collections::HashMap;

use crate::types::{GuessRecord, PlayerId};

/// A guess waiting for its round to resolve.
///
/// Words are looked up and scored when submitted, so resolving a round
/// never touches the store and cannot fail half-way.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingGuess {
    /// The word had already been scored when it was submitted.
    Known(GuessRecord),
    /// A word new to this game, already scored against the secret.
    Fresh {
        word: String,
        similarity: f64,
        percentile: Option<u32>,
    },
}

impl PendingGuess {
    pub(crate) fn word(&self) -> &str {
        match self {
            PendingGuess::Known(record) => &record.word,
            PendingGuess::Fresh { word, .. } => word,
        }
    }
}

/// One pending slot per registered player.
///
/// A player absent from the map is not part of the round; a round is
/// complete once every slot is filled.
#[derive(Debug, Default)]
pub(crate) struct RoundState {
    pending: HashMap<PlayerId, Option<PendingGuess>>,
}

impl RoundState {
    /// Register an empty slot. Keeps an existing submission.
    pub(crate) fn register(&mut self, player: &str) {
        self.pending.entry(player.to_string()).or_insert(None);
    }

    pub(crate) fn is_registered(&self, player: &str) -> bool {
        self.pending.contains_key(player)
    }

    /// Record a submission, replacing any earlier one from the same player
    /// this round.
    pub(crate) fn submit(&mut self, player: &str, guess: PendingGuess) {
        self.pending.insert(player.to_string(), Some(guess));
    }

    /// Whether every registered player has a submission.
    pub(crate) fn is_complete(&self) -> bool {
        !self.pending.is_empty() && self.pending.values().all(Option::is_some)
    }

    /// Take this player's submission, leaving the slot empty for the next round.
    pub(crate) fn take(&mut self, player: &str) -> Option<PendingGuess> {
        self.pending.get_mut(player).and_then(Option::take)
    }

    /// Empty every slot.
    pub(crate) fn clear(&mut self) {
        for slot in self.pending.values_mut() {
            *slot = None;
        }
    }

    pub(crate) fn pending_word(&self, player: &str) -> Option<&str> {
        self.pending
            .get(player)
            .and_then(Option::as_ref)
            .map(PendingGuess::word)
    }

    /// Players who have submitted this round.
    pub(crate) fn submitted(&self) -> impl Iterator<Item = &PlayerId> {
        self.pending
            .iter()
            .filter(|(_, slot)| slot.is_some())
            .map(|(player, _)| player)
    }
}
