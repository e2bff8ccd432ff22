use crate::game::GameMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty label attached to every result; there is only one level.
pub const DEFAULT_DIFFICULTY: &str = "normal";

/// Final record of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    pub mode: GameMode,
    pub score: u32,
    /// Seconds used: the full duration minus what was left on the clock
    pub elapsed_seconds: u32,
    pub difficulty: String,
}

impl PerformanceResult {
    pub fn new(mode: GameMode, score: u32, elapsed_seconds: u32) -> Self {
        Self {
            mode,
            score,
            elapsed_seconds,
            difficulty: DEFAULT_DIFFICULTY.to_string(),
        }
    }

    /// Star rating relative to a perfect game of `total_rounds` rounds.
    pub fn rating(&self, total_rounds: u32) -> Rating {
        let max = total_rounds * self.mode.points_per_round();
        if max == 0 {
            return Rating::new(1);
        }
        Rating::from_percentage(f64::from(self.score) / f64::from(max) * 100.0)
    }
}

/// One to five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    fn new(stars: u8) -> Self {
        Self(stars.clamp(1, 5))
    }

    pub fn from_percentage(percentage: f64) -> Self {
        let stars = if percentage >= 90.0 {
            5
        } else if percentage >= 75.0 {
            4
        } else if percentage >= 60.0 {
            3
        } else if percentage >= 40.0 {
            2
        } else {
            1
        };
        Self::new(stars)
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&"★".repeat(usize::from(self.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds() {
        let cases = [(0.0, 1), (39.9, 1), (40.0, 2), (60.0, 3), (75.0, 4), (89.9, 4), (90.0, 5), (140.0, 5)];
        for (percentage, stars) in cases {
            assert_eq!(Rating::from_percentage(percentage).stars(), stars, "{percentage}%");
        }
    }

    #[test]
    fn test_rating_scales_by_mode() {
        // 100 points is perfect for color-match but half marks for pattern
        let color_match = PerformanceResult::new(GameMode::ColorMatch, 100, 20);
        let pattern = PerformanceResult::new(GameMode::Pattern, 100, 20);
        assert_eq!(color_match.rating(10).stars(), 5);
        assert_eq!(pattern.rating(10).stars(), 2);
    }

    #[test]
    fn test_display_stars() {
        assert_eq!(Rating::from_percentage(61.0).to_string(), "★★★");
    }
}
