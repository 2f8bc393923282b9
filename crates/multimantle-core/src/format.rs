//! Text rendering of game results for the command layer.
//!
//! The guess line format `#<rank> | <word> | <similarity> | <percentile>`
//! with similarity fixed to two decimal places is a compatibility contract.

use crate::types::{GuessRecord, NearbyWord, RoundResult, SimilarityRange};

/// Shown in place of a percentile for guesses outside the neighbor table.
pub const COLD: &str = "cold";

/// `#<rank> | <word> | <similarity:.2> | <percentile or "cold">`
///
/// ```
/// use multimantle_core::format::format_guess_record;
/// use multimantle_core::GuessRecord;
///
/// let record = GuessRecord {
///     similarity: 81.0,
///     word: "wave".into(),
///     percentile: Some(42),
///     rank: 1,
/// };
/// assert_eq!(format_guess_record(&record), "#1 | wave | 81.00 | 42");
/// ```
pub fn format_guess_record(record: &GuessRecord) -> String {
    let percentile = match record.percentile {
        Some(p) => p.to_string(),
        None => COLD.to_string(),
    };
    format!(
        "#{} | {} | {:.2} | {}",
        record.rank, record.word, record.similarity, percentile
    )
}

/// Hint line for one of the secret's neighbors: `#top | <word> | <similarity:.2> | <percentile>`.
pub fn format_nearby_word(nearby: &NearbyWord) -> String {
    format!(
        "#top | {} | {:.2} | {}",
        nearby.word, nearby.similarity, nearby.percentile
    )
}

/// One line per record, best first.
pub fn format_status(records: &[GuessRecord]) -> String {
    records
        .iter()
        .map(format_guess_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `<player>: <guess line>` per player, in registration order.
pub fn format_round(round: &RoundResult) -> String {
    round
        .iter()
        .map(|(player, record)| format!("{}: {}", player, format_guess_record(record)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_similarity_range(range: &SimilarityRange) -> String {
    format!(
        "nearest {:.2} | 10th nearest {:.2} | 1000th nearest {:.2}",
        range.top, range.top10, range.rest
    )
}
