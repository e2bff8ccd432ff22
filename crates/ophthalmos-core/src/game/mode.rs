use crate::error::{OphthalmosError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds on the clock when a game starts.
pub const GAME_DURATION_SECS: u32 = 30;

/// Rounds in a full game.
pub const TOTAL_ROUNDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Pick the candidate identical to the target color
    #[serde(rename = "color-match")]
    ColorMatch,
    /// Select every tile sharing the reference color
    #[serde(rename = "pattern")]
    Pattern,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::ColorMatch, GameMode::Pattern];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::ColorMatch => "color-match",
            GameMode::Pattern => "pattern",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameMode::ColorMatch => "Color Match",
            GameMode::Pattern => "Pattern Recognition",
        }
    }

    /// Nominal points for a perfectly played round, used for star ratings.
    pub fn points_per_round(&self) -> u32 {
        match self {
            GameMode::ColorMatch => 10,
            GameMode::Pattern => 20,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = OphthalmosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color-match" | "color_match" | "colormatch" => Ok(GameMode::ColorMatch),
            "pattern" | "pattern-recognition" => Ok(GameMode::Pattern),
            other => Err(OphthalmosError::invalid_input(format!(
                "unknown game mode '{}' (expected 'color-match' or 'pattern')",
                other
            ))),
        }
    }
}
