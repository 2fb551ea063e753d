//! Exhaustive, non-repeating random coordinate supply for one grid.

use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::GeneratorError;
use crate::geometry::{Coord, GridDimensions};

/// Hands out every cell of a grid at most once, in random order.
///
/// The bank is shuffled once at construction and consumed from the end.
/// Cells can be excluded ahead of time, after which [`CoordGenerator::get`]
/// silently skips them.
#[derive(Debug, Clone)]
pub struct CoordGenerator {
    dimensions: GridDimensions,
    bank: Vec<Coord>,
    consumed: Vec<bool>,
    remaining: usize,
}

impl CoordGenerator {
    pub fn new<R: Rng + ?Sized>(dimensions: GridDimensions, rng: &mut R) -> Self {
        let mut bank: Vec<Coord> = dimensions.cells().collect();
        bank.shuffle(rng);
        let cells = dimensions.cell_count();
        CoordGenerator {
            dimensions,
            bank,
            consumed: alloc::vec![false; cells],
            remaining: cells,
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Next unconsumed coordinate; it is consumed before being returned.
    pub fn get(&mut self) -> Result<Coord, GeneratorError> {
        while let Some(coords) = self.bank.pop() {
            if self.mark(coords) {
                return Ok(coords);
            }
        }
        Err(GeneratorError::Exhausted)
    }

    /// Mark coordinates as consumed. Off-grid coordinates are ignored.
    pub fn exclude<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Coord>,
    {
        for c in coords {
            if self.dimensions.contains(c) {
                self.mark(c);
            }
        }
    }

    /// True if `coords` is on the grid and not consumed yet.
    pub fn can_generate(&self, coords: Coord) -> bool {
        self.dimensions.contains(coords) && !self.consumed[self.dimensions.index_of(coords)]
    }

    /// How many coordinates `get` can still produce.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn mark(&mut self, coords: Coord) -> bool {
        let slot = &mut self.consumed[self.dimensions.index_of(coords)];
        if *slot {
            return false;
        }
        *slot = true;
        self.remaining -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn generator(rows: i32, cols: i32, seed: u64) -> CoordGenerator {
        let mut rng = SmallRng::seed_from_u64(seed);
        CoordGenerator::new(GridDimensions::new(rows, cols).unwrap(), &mut rng)
    }

    #[test]
    fn drains_grid_then_exhausts() {
        let mut g = generator(4, 4, 7);
        let seen: BTreeSet<Coord> = (0..16).map(|_| g.get().unwrap()).collect();
        assert_eq!(seen.len(), 16);
        assert!(seen.iter().all(|c| g.dimensions().contains(*c)));
        assert_eq!(g.get().unwrap_err(), GeneratorError::Exhausted);
    }

    #[test]
    fn excluded_cells_never_returned() {
        let mut g = generator(3, 3, 1);
        g.exclude([Coord::new(1, 1), Coord::new(-1, 0), Coord::new(0, 9)]);
        assert!(!g.can_generate(Coord::new(1, 1)));
        assert!(!g.can_generate(Coord::new(-1, 0)));
        assert_eq!(g.remaining(), 8);
        let mut out = Vec::new();
        while let Ok(c) = g.get() {
            out.push(c);
        }
        assert_eq!(out.len(), 8);
        assert!(!out.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn excluding_twice_is_harmless() {
        let mut g = generator(2, 2, 3);
        g.exclude([Coord::new(0, 0)]);
        g.exclude([Coord::new(0, 0)]);
        assert_eq!(g.remaining(), 3);
    }
}
