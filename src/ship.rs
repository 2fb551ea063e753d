//! Hit tracking for a single ship.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::common::BoardError;

/// A ship of fixed length with the set of positions that have been hit.
///
/// Positions count from the ship's start cell, `0..length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    hits: BTreeSet<usize>,
}

impl Ship {
    pub fn new(length: usize) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidShipLength);
        }
        Ok(Ship {
            length,
            hits: BTreeSet::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.length
    }

    fn check_position(&self, position: usize) -> Result<(), BoardError> {
        if position >= self.length {
            return Err(BoardError::PositionOutOfRange {
                position,
                length: self.length,
            });
        }
        Ok(())
    }

    pub fn was_hit(&self, position: usize) -> Result<bool, BoardError> {
        self.check_position(position)?;
        Ok(self.hits.contains(&position))
    }

    /// Register a hit at `position`.
    pub fn hit(&mut self, position: usize) -> Result<(), BoardError> {
        if self.was_hit(position)? {
            return Err(BoardError::AlreadyHit(position));
        }
        self.hits.insert(position);
        Ok(())
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.length
    }

    /// Hit positions, ascending.
    pub fn hit_positions(&self) -> Vec<usize> {
        self.hits.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_rejected() {
        assert_eq!(Ship::new(0).unwrap_err(), BoardError::InvalidShipLength);
    }

    #[test]
    fn sinks_after_every_position_hit() {
        let mut ship = Ship::new(3).unwrap();
        ship.hit(2).unwrap();
        ship.hit(0).unwrap();
        assert!(!ship.is_sunk());
        ship.hit(1).unwrap();
        assert!(ship.is_sunk());
        assert_eq!(ship.hit_positions(), alloc::vec![0, 1, 2]);
    }

    #[test]
    fn double_hit_and_range_errors() {
        let mut ship = Ship::new(2).unwrap();
        ship.hit(1).unwrap();
        assert_eq!(ship.hit(1).unwrap_err(), BoardError::AlreadyHit(1));
        assert_eq!(
            ship.hit(2).unwrap_err(),
            BoardError::PositionOutOfRange {
                position: 2,
                length: 2
            }
        );
        assert!(!ship.was_hit(0).unwrap());
    }
}
