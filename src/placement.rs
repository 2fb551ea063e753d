//! Random fleet placement by randomized backtracking.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::GameBoard;
use crate::common::BoardError;
use crate::geometry::{placement_signature, Coord, Rect};

struct Search<'a, B, R: ?Sized> {
    lengths: Vec<usize>,
    board: &'a mut B,
    rng: &'a mut R,
    dead_ends: BTreeSet<String>,
    /// Rects placed by this search and not yet removed, in placement order.
    placed: Vec<Rect>,
}

impl<B: GameBoard, R: Rng + ?Sized> Search<'_, B, R> {
    fn dead_end_key(&self, idx: usize) -> String {
        let mut key = alloc::format!("{}:", idx);
        key.push_str(&placement_signature(&self.board.ships_coords()));
        key
    }

    fn place_from(&mut self, idx: usize, pool: &[Coord]) -> Result<bool, BoardError> {
        if idx == self.lengths.len() {
            return Ok(true);
        }

        let key = self.dead_end_key(idx);
        if self.dead_ends.contains(&key) {
            return Ok(false);
        }

        let shift = self.lengths[idx] as i32 - 1;
        for &start in pool {
            let mut ends = alloc::vec![
                Coord::new(start.row + shift, start.col),
                Coord::new(start.row, start.col + shift),
            ];
            if shift == 0 {
                ends.truncate(1);
            } else {
                ends.shuffle(&mut *self.rng);
            }

            for end in ends {
                let rect = Rect::new(start, end);
                if !self.board.can_place_ship(rect) {
                    continue;
                }
                self.board.place_ship(rect)?;
                self.placed.push(rect);

                let padded = rect.padded();
                let shrunk: Vec<Coord> = pool
                    .iter()
                    .copied()
                    .filter(|c| !padded.contains(*c))
                    .collect();
                if self.place_from(idx + 1, &shrunk)? {
                    return Ok(true);
                }
                self.board.unplace_ship(rect)?;
                self.placed.pop();
            }
        }

        self.dead_ends.insert(key);
        Ok(false)
    }

    /// Remove every ship this search placed, leaving earlier ships alone.
    fn roll_back(&mut self) {
        while let Some(rect) = self.placed.pop() {
            if let Err(err) = self.board.unplace_ship(rect) {
                log::warn!(
                    "could not remove ship at {} after failed placement: {}",
                    rect,
                    err
                );
            }
        }
    }
}

/// Try to place ships of every length in `lengths` on `board`.
///
/// On success the board holds the new ships and `true` is returned. On
/// failure every ship placed during the search has been removed again;
/// ships already on the board are left where they are.
pub fn place_ships_randomly<B, R>(lengths: &[usize], board: &mut B, rng: &mut R) -> bool
where
    B: GameBoard,
    R: Rng + ?Sized,
{
    let dims = board.grid_dimensions();
    if lengths
        .iter()
        .any(|&len| len == 0 || len > dims.max_side() as usize)
    {
        log::debug!("fleet {:?} cannot fit a {} grid", lengths, dims);
        return false;
    }

    let mut lengths = lengths.to_vec();
    lengths.shuffle(&mut *rng);
    let mut pool: Vec<Coord> = dims.cells().collect();
    pool.shuffle(&mut *rng);

    let mut search = Search {
        lengths,
        board,
        rng,
        dead_ends: BTreeSet::new(),
        placed: Vec::new(),
    };
    match search.place_from(0, &pool) {
        Ok(placed) => {
            log::debug!(
                "random placement on {} {} ({} dead ends memoized)",
                dims,
                if placed { "succeeded" } else { "failed" },
                search.dead_ends.len()
            );
            placed
        }
        Err(err) => {
            log::warn!("random placement aborted: {}", err);
            search.roll_back();
            false
        }
    }
}
