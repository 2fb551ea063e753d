//! Board state: ship placements, attack history and the dead zone.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{AttackRejection, BoardError, PlacementError, ShotResult};
use crate::geometry::{Coord, GridDimensions, Rect};
use crate::ship::Ship;

/// Operations shared by [`Board`] and the wrappers built around it.
///
/// The placement solver and the attacker only talk to boards through this
/// trait, so they never bypass the board's legality checks.
pub trait GameBoard {
    fn grid_dimensions(&self) -> GridDimensions;

    /// Non-throwing probe for [`GameBoard::place_ship`].
    fn can_place_ship(&self, rect: Rect) -> bool;

    fn place_ship(&mut self, rect: Rect) -> Result<(), BoardError>;

    /// Remove the ship whose rect matches `rect` exactly.
    fn unplace_ship(&mut self, rect: Rect) -> Result<(), BoardError>;

    fn unplace_all_ships(&mut self) -> Result<(), BoardError>;

    /// Rects of all placed ships, in placement order.
    fn ships_coords(&self) -> Vec<Rect>;

    fn receive_attack(&mut self, coords: Coord) -> Result<ShotResult, BoardError>;

    /// Non-throwing probe for [`GameBoard::receive_attack`].
    fn is_attack_valid(&self, coords: Coord) -> bool;

    fn is_fleet_sunk(&self) -> bool;
}

/// Per-ship view exposed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStatus {
    pub sunk: bool,
    pub hits: Vec<Coord>,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlacedShip {
    ship: Ship,
    rect: Rect,
    padded: Rect,
}

/// Main board state: ship placements, misses and dead-zone cells.
///
/// Once the first attack lands the fleet is frozen: no ship can be placed or
/// removed anymore.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    dimensions: GridDimensions,
    ships: Vec<PlacedShip>,
    missed: BTreeSet<Coord>,
    dead_zone: BTreeSet<Coord>,
    last_attack: Option<Coord>,
    sunk_count: usize,
}

impl Board {
    /// Create an empty board (no ships placed, no attacks received).
    pub fn new(dimensions: GridDimensions) -> Self {
        Board {
            dimensions,
            ships: Vec::new(),
            missed: BTreeSet::new(),
            dead_zone: BTreeSet::new(),
            last_attack: None,
            sunk_count: 0,
        }
    }

    fn check_not_attacked(&self) -> Result<(), PlacementError> {
        if self.last_attack.is_some() {
            return Err(PlacementError::AfterFirstAttack);
        }
        Ok(())
    }

    fn validate_placement(&self, rect: Rect) -> Result<(), PlacementError> {
        self.check_not_attacked()?;
        if !rect.is_well_formed() {
            return Err(PlacementError::Malformed(rect));
        }
        if !rect.within(self.dimensions) {
            return Err(PlacementError::OutOfGrid(rect));
        }
        if !rect.is_axis_aligned() {
            return Err(PlacementError::NotAxisAligned(rect));
        }
        if self.ships.iter().any(|ps| ps.padded.overlaps(&rect)) {
            return Err(PlacementError::Overlap(rect));
        }
        Ok(())
    }

    fn ship_index_at(&self, coords: Coord) -> Option<usize> {
        self.ships.iter().position(|ps| ps.rect.contains(coords))
    }

    fn validate_attack(&self, coords: Coord) -> Result<(), AttackRejection> {
        if !self.dimensions.contains(coords) {
            return Err(AttackRejection::OutOfGrid(coords));
        }
        if self.missed.contains(&coords) {
            return Err(AttackRejection::AlreadyAttacked(coords));
        }
        if self.dead_zone.contains(&coords) {
            return Err(AttackRejection::DeadZone(coords));
        }
        if let Some(idx) = self.ship_index_at(coords) {
            let ps = &self.ships[idx];
            if ps.ship.was_hit(ps.rect.position_of(coords)).unwrap_or(true) {
                return Err(AttackRejection::AlreadyAttacked(coords));
            }
        }
        Ok(())
    }

    pub fn last_attack(&self) -> Option<Coord> {
        self.last_attack
    }

    /// Missed shots, row-major.
    pub fn missed_attacks(&self) -> Vec<Coord> {
        self.missed.iter().copied().collect()
    }

    /// Dead-zone cells that were never shot at. Renderers show these as
    /// known-empty water.
    pub fn redundant_adjacent(&self) -> Vec<Coord> {
        self.dead_zone
            .iter()
            .filter(|c| !self.missed.contains(c))
            .copied()
            .collect()
    }

    pub fn ships_status(&self) -> Vec<ShipStatus> {
        self.ships
            .iter()
            .map(|ps| ShipStatus {
                sunk: ps.ship.is_sunk(),
                hits: ps
                    .ship
                    .hit_positions()
                    .into_iter()
                    .map(|pos| ps.rect.cell_at(pos))
                    .collect(),
                rect: ps.rect,
            })
            .collect()
    }

    pub fn sunk_count(&self) -> usize {
        self.sunk_count
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Lengths of the placed ships, in placement order.
    pub fn ship_lengths(&self) -> Vec<usize> {
        self.ships.iter().map(|ps| ps.ship.len()).collect()
    }

    /// Whether `coords` is part of a placed ship.
    pub fn has_ship_at(&self, coords: Coord) -> bool {
        self.ship_index_at(coords).is_some()
    }
}

impl GameBoard for Board {
    fn grid_dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn can_place_ship(&self, rect: Rect) -> bool {
        self.validate_placement(rect).is_ok()
    }

    fn place_ship(&mut self, rect: Rect) -> Result<(), BoardError> {
        self.validate_placement(rect)?;
        let ship = Ship::new(rect.len())?;
        log::debug!("placed ship of length {} at {}", ship.len(), rect);
        self.ships.push(PlacedShip {
            ship,
            rect,
            padded: rect.padded(),
        });
        Ok(())
    }

    fn unplace_ship(&mut self, rect: Rect) -> Result<(), BoardError> {
        self.check_not_attacked()?;
        let idx = self
            .ships
            .iter()
            .position(|ps| ps.rect == rect)
            .ok_or(BoardError::NotFound(rect))?;
        self.ships.remove(idx);
        log::debug!("removed ship at {}", rect);
        Ok(())
    }

    fn unplace_all_ships(&mut self) -> Result<(), BoardError> {
        self.check_not_attacked()?;
        self.ships.clear();
        Ok(())
    }

    fn ships_coords(&self) -> Vec<Rect> {
        self.ships.iter().map(|ps| ps.rect).collect()
    }

    /// Process a shot at `coords`, marking hits/misses and growing the dead
    /// zone around hits and sunk ships.
    fn receive_attack(&mut self, coords: Coord) -> Result<ShotResult, BoardError> {
        self.validate_attack(coords)?;
        self.last_attack = Some(coords);

        let Some(idx) = self.ship_index_at(coords) else {
            self.missed.insert(coords);
            log::trace!("attack at {} missed", coords);
            return Ok(ShotResult::Miss);
        };

        let dims = self.dimensions;
        let ps = &mut self.ships[idx];
        ps.ship.hit(ps.rect.position_of(coords))?;
        self.dead_zone.extend(coords.diagonals_within(dims));

        if !ps.ship.is_sunk() {
            log::trace!("attack at {} hit", coords);
            return Ok(ShotResult::Hit);
        }

        let rect = ps.rect;
        self.sunk_count += 1;
        self.dead_zone.extend(rect.ring_within(dims));
        log::info!(
            "ship at {} sunk ({}/{})",
            rect,
            self.sunk_count,
            self.ships.len()
        );
        Ok(ShotResult::SunkHit)
    }

    fn is_attack_valid(&self, coords: Coord) -> bool {
        self.validate_attack(coords).is_ok()
    }

    fn is_fleet_sunk(&self) -> bool {
        self.sunk_count == self.ships.len()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  dimensions: {},\n  ships: {:?},\n  missed: {:?},\n  dead_zone: {:?},\n  sunk: {}\n}}",
            self.dimensions,
            self.ships_coords(),
            self.missed,
            self.dead_zone,
            self.sunk_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: i32, cols: i32) -> Board {
        Board::new(GridDimensions::new(rows, cols).unwrap())
    }

    fn rect(a: (i32, i32), b: (i32, i32)) -> Rect {
        Rect::from((a, b))
    }

    #[test]
    fn placement_causes_are_distinct() {
        let mut b = board(5, 5);
        b.place_ship(rect((0, 0), (0, 1))).unwrap();
        let err = |r: Rect| match b.clone().place_ship(r) {
            Err(BoardError::IllegalPlacement(e)) => e,
            other => panic!("unexpected {:?}", other),
        };
        assert!(matches!(err(rect((2, 3), (2, 1))), PlacementError::Malformed(_)));
        assert!(matches!(err(rect((4, 4), (4, 5))), PlacementError::OutOfGrid(_)));
        assert!(matches!(err(rect((2, 2), (3, 3))), PlacementError::NotAxisAligned(_)));
        assert!(matches!(err(rect((1, 2), (3, 2))), PlacementError::Overlap(_)));
    }

    #[test]
    fn unplace_requires_exact_rect() {
        let mut b = board(4, 4);
        b.place_ship(rect((1, 1), (1, 2))).unwrap();
        assert_eq!(
            b.unplace_ship(rect((1, 1), (1, 1))).unwrap_err(),
            BoardError::NotFound(rect((1, 1), (1, 1)))
        );
        b.unplace_ship(rect((1, 1), (1, 2))).unwrap();
        assert_eq!(b.ship_count(), 0);
    }

    #[test]
    fn fleet_frozen_after_first_attack() {
        let mut b = board(4, 4);
        b.place_ship(rect((0, 0), (0, 0))).unwrap();
        b.receive_attack(Coord::new(3, 3)).unwrap();
        assert!(!b.can_place_ship(rect((2, 0), (2, 1))));
        let frozen = BoardError::IllegalPlacement(PlacementError::AfterFirstAttack);
        assert_eq!(b.place_ship(rect((2, 0), (2, 1))).unwrap_err(), frozen);
        assert_eq!(b.unplace_ship(rect((0, 0), (0, 0))).unwrap_err(), frozen);
        assert_eq!(b.unplace_all_ships().unwrap_err(), frozen);
    }

    #[test]
    fn hit_marks_diagonals_dead() {
        let mut b = board(4, 4);
        b.place_ship(rect((1, 1), (1, 3))).unwrap();
        assert_eq!(b.receive_attack(Coord::new(1, 2)).unwrap(), ShotResult::Hit);
        for c in [(0, 1), (0, 3), (2, 1), (2, 3)] {
            assert!(!b.is_attack_valid(c.into()));
        }
        assert!(b.is_attack_valid(Coord::new(0, 2)));
        assert_eq!(b.redundant_adjacent().len(), 4);
        assert_eq!(
            b.receive_attack(Coord::new(1, 2)).unwrap_err(),
            BoardError::InvalidAttack(AttackRejection::AlreadyAttacked(Coord::new(1, 2)))
        );
    }

    #[test]
    fn status_reports_hits_in_order() {
        let mut b = board(5, 5);
        b.place_ship(rect((0, 4), (2, 4))).unwrap();
        b.receive_attack(Coord::new(2, 4)).unwrap();
        b.receive_attack(Coord::new(0, 4)).unwrap();
        let status = b.ships_status();
        assert_eq!(status.len(), 1);
        assert!(!status[0].sunk);
        assert_eq!(status[0].hits, alloc::vec![Coord::new(0, 4), Coord::new(2, 4)]);
        assert_eq!(b.last_attack(), Some(Coord::new(0, 4)));
    }

    #[test]
    fn empty_board_counts_as_sunk_fleet() {
        assert!(board(2, 2).is_fleet_sunk());
    }
}
