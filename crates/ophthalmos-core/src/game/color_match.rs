use crate::color::Color;
use rand::Rng;

/// One find-the-target round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMatchRound {
    target: Color,
    candidates: Vec<Color>,
}

impl ColorMatchRound {
    pub const CANDIDATES: usize = 6;

    /// Draws six random candidates and picks the target among them, so the
    /// target is always present.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let candidates: Vec<Color> = (0..Self::CANDIDATES).map(|_| Color::random(rng)).collect();
        let target = candidates[rng.gen_range(0..candidates.len())];
        Self { target, candidates }
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn candidates(&self) -> &[Color] {
        &self.candidates
    }

    /// Whether the candidate at `index` equals the target; `None` if there is
    /// no such candidate.
    ///
    /// Equality is exact RGB equality, so a candidate that happens to
    /// duplicate the target also counts.
    pub fn is_match(&self, index: usize) -> Option<bool> {
        self.candidates.get(index).map(|color| *color == self.target)
    }
}
