//! Game play styles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// How players interact with a running game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Everyone guesses independently, whenever they like.
    #[default]
    Chaos,
    /// Synchronized rounds: a round is scored once every player has submitted.
    Simul,
    /// Reserved for turn-based play; currently scored like `Chaos`.
    Turns,
}

impl GameMode {
    /// All modes, in declaration order.
    pub const ALL: [GameMode; 3] = [GameMode::Chaos, GameMode::Simul, GameMode::Turns];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Chaos => "CHAOS",
            GameMode::Simul => "SIMUL",
            GameMode::Turns => "TURNS",
        }
    }

    /// Whether guesses are collected into synchronized rounds.
    pub fn is_simultaneous(&self) -> bool {
        matches!(self, GameMode::Simul)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chaos" => Ok(GameMode::Chaos),
            "simul" => Ok(GameMode::Simul),
            "turns" => Ok(GameMode::Turns),
            other => Err(CoreError::ConfigError(format!(
                "unknown game mode '{}', expected one of chaos, simul, turns",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("CHAOS".parse::<GameMode>().unwrap(), GameMode::Chaos);
        assert_eq!("simul".parse::<GameMode>().unwrap(), GameMode::Simul);
        assert_eq!(" Turns ".parse::<GameMode>().unwrap(), GameMode::Turns);
        assert!("blitz".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in GameMode::ALL {
            assert_eq!(mode.to_string().parse::<GameMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&GameMode::Simul).unwrap();
        assert_eq!(json, "\"simul\"");
        let mode: GameMode = serde_json::from_str("\"turns\"").unwrap();
        assert_eq!(mode, GameMode::Turns);
    }

    #[test]
    fn test_only_simul_is_simultaneous() {
        assert!(GameMode::Simul.is_simultaneous());
        assert!(!GameMode::Chaos.is_simultaneous());
        assert!(!GameMode::Turns.is_simultaneous());
    }
}
