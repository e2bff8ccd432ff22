//! Side-by-side preview of original and adapted colors.

use super::model::AdaptationFactors;
use super::transform::adapt;
use crate::color::Color;

/// A color with a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Color,
}

/// Everyday colors used to preview an adaptation.
pub const SAMPLE_PALETTE: [NamedColor; 9] = [
    NamedColor { name: "Forest Green", color: Color::new(34, 139, 34) },
    NamedColor { name: "Sky Blue", color: Color::new(135, 206, 235) },
    NamedColor { name: "Sunset Orange", color: Color::new(255, 179, 71) },
    NamedColor { name: "Ocean Blue", color: Color::new(74, 144, 164) },
    NamedColor { name: "Moss Green", color: Color::new(74, 124, 35) },
    NamedColor { name: "Earth Brown", color: Color::new(139, 115, 85) },
    NamedColor { name: "Rose Red", color: Color::new(255, 107, 107) },
    NamedColor { name: "Lavender", color: Color::new(181, 126, 220) },
    NamedColor { name: "Coral", color: Color::new(255, 127, 80) },
];

/// Adapted-mode toggle plus whatever factors have arrived so far.
///
/// Colors are only adapted while the mode is on *and* factors are loaded, so
/// a slow or failed factor request simply keeps showing the originals.
#[derive(Debug, Clone, Default)]
pub struct ColorSimulator {
    adapted_mode: bool,
    factors: Option<AdaptationFactors>,
}

impl ColorSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapted_mode(&self) -> bool {
        self.adapted_mode
    }

    pub fn set_adapted_mode(&mut self, on: bool) {
        self.adapted_mode = on;
    }

    /// Flips the mode and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.adapted_mode = !self.adapted_mode;
        self.adapted_mode
    }

    pub fn factors(&self) -> Option<&AdaptationFactors> {
        self.factors.as_ref()
    }

    pub fn load_factors(&mut self, factors: AdaptationFactors) {
        self.factors = Some(factors);
    }

    pub fn clear_factors(&mut self) {
        self.factors = None;
    }

    /// Factors currently in effect, if any.
    pub fn active_factors(&self) -> Option<&AdaptationFactors> {
        self.factors.as_ref().filter(|_| self.adapted_mode)
    }

    /// The color to show for `color` in the current mode.
    pub fn display(&self, color: Color) -> Color {
        adapt(color, self.active_factors())
    }

    /// Recommendation lines to show; empty unless adaptation is in effect.
    pub fn recommendations(&self) -> &[String] {
        self.active_factors()
            .map(|f| f.recommendations.as_slice())
            .unwrap_or_default()
    }

    /// `(sample, displayed)` pairs for the sample palette.
    pub fn preview(&self) -> Vec<(NamedColor, Color)> {
        SAMPLE_PALETTE
            .iter()
            .map(|sample| (*sample, self.display(sample.color)))
            .collect()
    }
}
