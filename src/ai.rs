//! Hunt/target attacking strategy for the computer opponent.
//!
//! The attacker searches at random until it hits something (hunt), probes the
//! four neighbours of the first hit, then walks along the discovered axis,
//! flipping direction at misses and edges, until the ship sinks (target).
//!
//! It never sees the opponent's ships. Every shot goes through the board's
//! `receive_attack`, and every cell the board would reject afterwards (shot
//! cells, diagonals of hits, rings of sunk ships) is excluded from the
//! attacker's own [`CoordGenerator`] at the same time. The two therefore agree
//! on which cells are still worth shooting at.

use alloc::vec::Vec;
use core::mem;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::GameBoard;
use crate::common::{AttackError, ShotResult};
use crate::generator::CoordGenerator;
use crate::geometry::{Coord, GridDimensions, Rect, Step};

/// Which phase of the hunt the attacker is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No damaged ship is known; shoot at random.
    Fresh,
    /// One hit is known; try its orthogonal neighbours.
    ExploreAdjacent,
    /// The ship's axis is known; walk along it.
    FixedDirection,
}

#[derive(Debug, Clone)]
enum Target {
    Fresh,
    ExploreAdjacent {
        hits: Vec<Coord>,
        pending: Vec<Coord>,
    },
    FixedDirection {
        hits: Vec<Coord>,
        cursor: Coord,
        step: Step,
    },
}

/// Computer opponent bound to one enemy board.
#[derive(Debug, Clone)]
pub struct HuntTarget<R = SmallRng> {
    dimensions: GridDimensions,
    generator: CoordGenerator,
    rng: R,
    target: Target,
}

impl<R: Rng> HuntTarget<R> {
    /// Create an attacker for `board`. The attacker must then be used against
    /// that board only, and nothing else may attack it meanwhile.
    pub fn new<B: GameBoard + ?Sized>(board: &B, mut rng: R) -> Self {
        let dimensions = board.grid_dimensions();
        let generator = CoordGenerator::new(dimensions, &mut rng);
        HuntTarget {
            dimensions,
            generator,
            rng,
            target: Target::Fresh,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.target {
            Target::Fresh => Phase::Fresh,
            Target::ExploreAdjacent { .. } => Phase::ExploreAdjacent,
            Target::FixedDirection { .. } => Phase::FixedDirection,
        }
    }

    /// Hits landed on the ship currently being hunted, in shot order.
    pub fn ship_hits(&self) -> &[Coord] {
        match &self.target {
            Target::Fresh => &[],
            Target::ExploreAdjacent { hits, .. } | Target::FixedDirection { hits, .. } => {
                hits.as_slice()
            }
        }
    }

    /// Whether the attacker still considers `coords` worth a shot.
    pub fn can_attack(&self, coords: Coord) -> bool {
        self.generator.can_generate(coords)
    }

    /// Fire exactly one shot at `board`.
    ///
    /// If the board rejects the shot, the ship being hunted is kept and the
    /// rejected cell is never tried again. `NoCandidate` and
    /// `DirectionStalled` abandon the hunt and return to [`Phase::Fresh`].
    pub fn attack<B: GameBoard + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<ShotResult, AttackError> {
        if board.grid_dimensions() != self.dimensions {
            return Err(AttackError::DimensionMismatch);
        }
        match mem::replace(&mut self.target, Target::Fresh) {
            Target::Fresh => self.hunt(board),
            Target::ExploreAdjacent { hits, pending } => self.explore(board, hits, pending),
            Target::FixedDirection { hits, cursor, step } => {
                self.follow(board, hits, cursor, step)
            }
        }
    }

    /// Attack `coords` and keep the generator in step with the board's
    /// dead zone.
    fn fire<B: GameBoard + ?Sized>(
        &mut self,
        board: &mut B,
        coords: Coord,
    ) -> Result<ShotResult, AttackError> {
        self.generator.exclude([coords]);
        let result = board.receive_attack(coords)?;
        if result.is_hit() {
            self.generator.exclude(coords.diagonals_within(self.dimensions));
        }
        log::trace!("shot at {} -> {:?}", coords, result);
        Ok(result)
    }

    /// Exclude the ring around the sunk ship; `target` is already `Fresh`.
    fn sink(&mut self, hits: &[Coord]) {
        if let Some(rect) = Rect::spanning(hits) {
            log::debug!("sank ship at {} after {} hits", rect, hits.len());
            self.generator.exclude(rect.ring_within(self.dimensions));
        }
    }

    fn hunt<B: GameBoard + ?Sized>(&mut self, board: &mut B) -> Result<ShotResult, AttackError> {
        let coords = self.generator.get()?;
        let result = self.fire(board, coords)?;
        match result {
            ShotResult::Miss => {}
            ShotResult::SunkHit => self.sink(&[coords]),
            ShotResult::Hit => {
                let mut pending: Vec<Coord> = coords
                    .neighbours4_within(self.dimensions)
                    .into_iter()
                    .filter(|c| self.generator.can_generate(*c))
                    .collect();
                pending.shuffle(&mut self.rng);
                self.target = Target::ExploreAdjacent {
                    hits: alloc::vec![coords],
                    pending,
                };
            }
        }
        Ok(result)
    }

    fn explore<B: GameBoard + ?Sized>(
        &mut self,
        board: &mut B,
        mut hits: Vec<Coord>,
        mut pending: Vec<Coord>,
    ) -> Result<ShotResult, AttackError> {
        let coords = loop {
            match pending.pop() {
                Some(c) if self.generator.can_generate(c) => break c,
                Some(_) => continue,
                None => return Err(AttackError::NoCandidate),
            }
        };
        let result = match self.fire(board, coords) {
            Ok(result) => result,
            Err(err) => {
                self.target = Target::ExploreAdjacent { hits, pending };
                return Err(err);
            }
        };
        match result {
            ShotResult::Miss => {
                self.target = Target::ExploreAdjacent { hits, pending };
            }
            ShotResult::Hit => {
                let step = coords - hits[0];
                hits.push(coords);
                self.target = Target::FixedDirection {
                    hits,
                    cursor: coords,
                    step,
                };
            }
            ShotResult::SunkHit => {
                hits.push(coords);
                self.sink(&hits);
            }
        }
        Ok(result)
    }

    fn follow<B: GameBoard + ?Sized>(
        &mut self,
        board: &mut B,
        mut hits: Vec<Coord>,
        cursor: Coord,
        mut step: Step,
    ) -> Result<ShotResult, AttackError> {
        let first = hits[0];
        let guard = 2 * self.dimensions.max_side();
        let mut candidate = cursor + step;
        let mut flips = 0;
        // Flip around the first hit until an unexplored cell turns up. These
        // retries do not shoot.
        while !self.generator.can_generate(candidate) {
            flips += 1;
            if flips > guard {
                return Err(AttackError::DirectionStalled);
            }
            step = step.neg();
            candidate = first + step;
        }

        let result = match self.fire(board, candidate) {
            Ok(result) => result,
            Err(err) => {
                self.target = Target::FixedDirection {
                    hits,
                    cursor: first,
                    step,
                };
                return Err(err);
            }
        };
        match result {
            ShotResult::Miss => {
                self.target = Target::FixedDirection {
                    hits,
                    cursor: first,
                    step: step.neg(),
                };
            }
            ShotResult::Hit => {
                hits.push(candidate);
                self.target = Target::FixedDirection {
                    hits,
                    cursor: candidate,
                    step,
                };
            }
            ShotResult::SunkHit => {
                hits.push(candidate);
                self.sink(&hits);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use rand::SeedableRng;

    fn board_with(rows: i32, cols: i32, ships: &[((i32, i32), (i32, i32))]) -> Board {
        let mut board = Board::new(GridDimensions::new(rows, cols).unwrap());
        for &r in ships {
            board.place_ship(Rect::from(r)).unwrap();
        }
        board
    }

    #[test]
    fn single_cell_ship_on_single_cell_grid() {
        let mut board = board_with(1, 1, &[((0, 0), (0, 0))]);
        let mut ai = HuntTarget::new(&board, SmallRng::seed_from_u64(0));
        assert_eq!(ai.attack(&mut board).unwrap(), ShotResult::SunkHit);
        assert_eq!(ai.phase(), Phase::Fresh);
        assert!(board.is_fleet_sunk());
        assert_eq!(
            ai.attack(&mut board).unwrap_err(),
            AttackError::Generator(crate::common::GeneratorError::Exhausted)
        );
    }

    #[test]
    fn hit_moves_to_explore_then_fixed_direction() {
        // A 1x3 ship filling a 1x3 grid: every first shot hits.
        let mut board = board_with(1, 3, &[((0, 0), (0, 2))]);
        let mut ai = HuntTarget::new(&board, SmallRng::seed_from_u64(9));
        assert_eq!(ai.attack(&mut board).unwrap(), ShotResult::Hit);
        assert_eq!(ai.phase(), Phase::ExploreAdjacent);
        assert_eq!(ai.ship_hits().len(), 1);

        let mut shots = 1;
        while !board.is_fleet_sunk() {
            ai.attack(&mut board).unwrap();
            shots += 1;
        }
        assert_eq!(shots, 3);
        assert_eq!(ai.phase(), Phase::Fresh);
    }

    #[test]
    fn rejects_foreign_grid() {
        let board = board_with(4, 4, &[]);
        let mut other = board_with(5, 5, &[]);
        let mut ai = HuntTarget::new(&board, SmallRng::seed_from_u64(1));
        assert_eq!(
            ai.attack(&mut other).unwrap_err(),
            AttackError::DimensionMismatch
        );
    }
}
