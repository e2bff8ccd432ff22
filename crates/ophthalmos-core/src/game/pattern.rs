use crate::color::Color;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

/// Result of clicking a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileToggle {
    Selected { matches_reference: bool },
    Deselected,
}

/// One select-all-matching-tiles round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRound {
    reference: Color,
    tiles: Vec<Color>,
    selected: BTreeSet<usize>,
}

impl PatternRound {
    pub const TILES: usize = 9;

    /// Builds nine tiles alternating between two random base colors (even
    /// positions take the first), then shuffles them. The first base color
    /// is the reference, so five tiles match it unless both bases collide.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bases = [Color::random(rng), Color::random(rng)];
        let mut tiles: Vec<Color> = (0..Self::TILES).map(|i| bases[i % 2]).collect();
        tiles.shuffle(rng);

        Self {
            reference: bases[0],
            tiles,
            selected: BTreeSet::new(),
        }
    }

    pub fn reference(&self) -> Color {
        self.reference
    }

    pub fn tiles(&self) -> &[Color] {
        &self.tiles
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selects the tile if it is not selected, deselects it otherwise.
    /// Returns `None` for an index outside the grid.
    pub fn toggle(&mut self, index: usize) -> Option<TileToggle> {
        let color = *self.tiles.get(index)?;

        if self.selected.remove(&index) {
            Some(TileToggle::Deselected)
        } else {
            self.selected.insert(index);
            Some(TileToggle::Selected {
                matches_reference: color == self.reference,
            })
        }
    }

    /// Indices of every tile showing the reference color.
    pub fn matching_indices(&self) -> BTreeSet<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, color)| **color == self.reference)
            .map(|(index, _)| index)
            .collect()
    }

    /// True when the selection is exactly the set of matching tiles.
    pub fn is_exact_selection(&self) -> bool {
        self.selected == self.matching_indices()
    }
}
