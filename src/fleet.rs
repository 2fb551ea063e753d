//! A board restricted to a fixed multiset of ship lengths.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::board::{Board, GameBoard};
use crate::common::{BoardError, ShotResult};
use crate::geometry::{Coord, GridDimensions, Rect};

/// Wraps a [`Board`] and only lets through placements whose length is still
/// available in the configured fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetBoard {
    board: Board,
    lengths: Vec<usize>,
    available: BTreeMap<usize, usize>,
    placed: BTreeMap<usize, usize>,
}

impl FleetBoard {
    pub fn new(dimensions: GridDimensions, lengths: &[usize]) -> Self {
        let mut available = BTreeMap::new();
        let mut placed = BTreeMap::new();
        for &len in lengths {
            *available.entry(len).or_insert(0) += 1;
            placed.entry(len).or_insert(0);
        }
        let mut lengths = lengths.to_vec();
        lengths.sort_unstable();
        FleetBoard {
            board: Board::new(dimensions),
            lengths,
            available,
            placed,
        }
    }

    /// Read access to the wrapped board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The configured fleet, ascending.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Lengths still waiting to be placed, ascending.
    pub fn available_lengths(&self) -> Vec<usize> {
        self.available
            .iter()
            .flat_map(|(&len, &count)| core::iter::repeat(len).take(count))
            .collect()
    }

    /// Every configured ship has been placed.
    pub fn is_complete(&self) -> bool {
        self.available.values().all(|&count| count == 0)
    }

    fn length_allowed(&self, len: usize) -> Result<(), BoardError> {
        if self.placed.contains_key(&len) {
            Ok(())
        } else {
            Err(BoardError::LengthNotAllowed(len))
        }
    }

    fn length_available(&self, len: usize) -> bool {
        self.available.get(&len).is_some_and(|&count| count > 0)
    }

    fn book(&mut self, len: usize, placing: bool) {
        let (from, to) = if placing {
            (&mut self.available, &mut self.placed)
        } else {
            (&mut self.placed, &mut self.available)
        };
        if let Some(count) = from.get_mut(&len) {
            *count -= 1;
        }
        *to.entry(len).or_insert(0) += 1;
    }
}

impl GameBoard for FleetBoard {
    fn grid_dimensions(&self) -> GridDimensions {
        self.board.grid_dimensions()
    }

    fn can_place_ship(&self, rect: Rect) -> bool {
        self.length_available(rect.len()) && self.board.can_place_ship(rect)
    }

    fn place_ship(&mut self, rect: Rect) -> Result<(), BoardError> {
        let len = rect.len();
        self.length_allowed(len)?;
        if !self.length_available(len) {
            return Err(BoardError::LengthUnavailable(len));
        }
        self.board.place_ship(rect)?;
        self.book(len, true);
        Ok(())
    }

    fn unplace_ship(&mut self, rect: Rect) -> Result<(), BoardError> {
        let len = rect.len();
        self.length_allowed(len)?;
        if self.placed.get(&len).copied().unwrap_or(0) == 0 {
            return Err(BoardError::NotFound(rect));
        }
        self.board.unplace_ship(rect)?;
        self.book(len, false);
        Ok(())
    }

    fn unplace_all_ships(&mut self) -> Result<(), BoardError> {
        self.board.unplace_all_ships()?;
        for (len, count) in self.placed.iter_mut() {
            *self.available.entry(*len).or_insert(0) += *count;
            *count = 0;
        }
        Ok(())
    }

    fn ships_coords(&self) -> Vec<Rect> {
        self.board.ships_coords()
    }

    fn receive_attack(&mut self, coords: Coord) -> Result<ShotResult, BoardError> {
        self.board.receive_attack(coords)
    }

    fn is_attack_valid(&self, coords: Coord) -> bool {
        self.board.is_attack_valid(coords)
    }

    fn is_fleet_sunk(&self) -> bool {
        self.board.is_fleet_sunk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn fleet() -> FleetBoard {
        FleetBoard::new(GridDimensions::new(6, 6).unwrap(), &[1, 1, 2, 4])
    }

    fn rect(a: (i32, i32), b: (i32, i32)) -> Rect {
        Rect::from((a, b))
    }

    #[test]
    fn rejects_foreign_and_exhausted_lengths() {
        let mut f = fleet();
        assert_eq!(
            f.place_ship(rect((0, 0), (0, 2))).unwrap_err(),
            BoardError::LengthNotAllowed(3)
        );
        f.place_ship(rect((0, 0), (0, 1))).unwrap();
        assert!(!f.can_place_ship(rect((2, 0), (2, 1))));
        assert_eq!(
            f.place_ship(rect((2, 0), (2, 1))).unwrap_err(),
            BoardError::LengthUnavailable(2)
        );
        assert_eq!(f.available_lengths(), vec![1, 1, 4]);
    }

    #[test]
    fn unplace_restores_availability() {
        let mut f = fleet();
        f.place_ship(rect((0, 0), (0, 0))).unwrap();
        f.place_ship(rect((2, 2), (2, 2))).unwrap();
        assert_eq!(
            f.unplace_ship(rect((4, 0), (4, 1))).unwrap_err(),
            BoardError::NotFound(rect((4, 0), (4, 1)))
        );
        f.unplace_ship(rect((0, 0), (0, 0))).unwrap();
        assert_eq!(f.available_lengths(), vec![1, 2, 4]);
        f.unplace_all_ships().unwrap();
        assert_eq!(f.available_lengths(), vec![1, 1, 2, 4]);
        assert!(f.ships_coords().is_empty());
    }

    #[test]
    fn failed_inner_placement_books_nothing() {
        let mut f = fleet();
        f.place_ship(rect((0, 0), (0, 1))).unwrap();
        assert!(f.place_ship(rect((1, 2), (1, 2))).is_err());
        assert_eq!(f.available_lengths(), vec![1, 1, 4]);
        f.place_ship(rect((0, 3), (0, 3))).unwrap();
        f.place_ship(rect((2, 0), (2, 0))).unwrap();
        f.place_ship(rect((5, 0), (5, 3))).unwrap();
        assert!(f.is_complete());
    }
}
